use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use netdrift_baseline::BaselineStore;
use netdrift_diff::{diff_exact, diff_states, ExactDiff, Hunk, LineChange, StateDiff};
use netdrift_inventory::Inventory;
use netdrift_types::Snapshot;
use tracing::debug;

use crate::cli::{BaselineAction, Cli, Command, DevicesArgs, DiffArgs, OutputFormat};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let ctx = AppContext {
        inventory_path: cli
            .inventory
            .unwrap_or_else(|| PathBuf::from("netdrift.toml")),
        baseline_dir: cli.baseline_dir.unwrap_or_else(default_baseline_dir),
        format: cli.format,
    };

    match cli.command {
        Command::Diff(args) => cmd_diff(&ctx, args),
        Command::Baseline(args) => match args.action {
            BaselineAction::Save {
                device,
                command,
                file,
            } => cmd_baseline_save(&ctx, &device, &command, &file),
            BaselineAction::List => cmd_baseline_list(&ctx),
            BaselineAction::Diff {
                device,
                command,
                file,
                exact,
            } => cmd_baseline_diff(&ctx, &device, &command, &file, exact),
        },
        Command::Devices(args) => cmd_devices(&ctx, args),
    }
}

struct AppContext {
    inventory_path: PathBuf,
    baseline_dir: PathBuf,
    format: OutputFormat,
}

fn default_baseline_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".netdrift")
        .join("baselines")
}

fn read_capture(path: &Path) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading capture file {}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "read capture");
    Ok(text)
}

fn cmd_diff(ctx: &AppContext, args: DiffArgs) -> anyhow::Result<ExitCode> {
    let old = read_capture(&args.old)?;
    let new = read_capture(&args.new)?;
    run_diff(ctx, &old, &new, args.exact)
}

fn cmd_baseline_save(
    ctx: &AppContext,
    device: &str,
    command: &str,
    file: &Path,
) -> anyhow::Result<ExitCode> {
    let text = read_capture(file)?;
    let store = BaselineStore::new(&ctx.baseline_dir);
    let path = store.save(&Snapshot::new(device, command, &text))?;
    println!(
        "{} Baseline saved: {}",
        "✓".green().bold(),
        path.display().to_string().bold()
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_baseline_list(ctx: &AppContext) -> anyhow::Result<ExitCode> {
    let store = BaselineStore::new(&ctx.baseline_dir);
    let entries = store.list()?;
    if entries.is_empty() {
        println!("No baselines stored in {}", ctx.baseline_dir.display());
        return Ok(ExitCode::SUCCESS);
    }
    for entry in entries {
        println!(
            "{}  {}  {}",
            entry.device.yellow(),
            entry.command.bold(),
            entry.captured_at.to_string().dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_baseline_diff(
    ctx: &AppContext,
    device: &str,
    command: &str,
    file: &Path,
    exact: bool,
) -> anyhow::Result<ExitCode> {
    let store = BaselineStore::new(&ctx.baseline_dir);
    let baseline = store
        .load(device, command)
        .with_context(|| format!("loading baseline for {device} {command:?}"))?;
    let fresh = read_capture(file)?;
    debug!(device, command, "comparing against baseline");
    run_diff(ctx, &baseline.text, &fresh, exact)
}

fn cmd_devices(ctx: &AppContext, args: DevicesArgs) -> anyhow::Result<ExitCode> {
    let inventory = Inventory::load(&ctx.inventory_path)
        .with_context(|| format!("loading inventory {}", ctx.inventory_path.display()))?;

    let devices: Vec<_> = match &args.target {
        Some(target) => inventory.resolve(target)?,
        None => inventory.devices().iter().collect(),
    };

    for device in devices {
        println!(
            "{}  {}  {}",
            device.name.yellow(),
            device.host.bold(),
            device.platform.to_string().dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_diff(ctx: &AppContext, old: &str, new: &str, exact: bool) -> anyhow::Result<ExitCode> {
    if exact {
        let diff = diff_exact(old, new);
        match ctx.format {
            OutputFormat::Text => render_exact(&diff),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        }
        Ok(exit_for(!diff.is_empty()))
    } else {
        let report = diff_states(old, new);
        match ctx.format {
            OutputFormat::Text => render_state(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(exit_for(!report.high_confidence.is_empty()))
    }
}

fn exit_for(changed: bool) -> ExitCode {
    ExitCode::from(exit_code(changed))
}

// 0 = clean, 1 = drift found, 2 = error (mapped in main).
fn exit_code(changed: bool) -> u8 {
    u8::from(changed)
}

fn render_state(report: &StateDiff) {
    if !report.has_changes() && report.ignored.is_empty() {
        println!("{}", "No significant changes detected.".green());
        return;
    }

    if !report.high_confidence.is_empty() {
        println!("{}", "High confidence changes:".bold());
        for line in &report.high_confidence {
            println!("  {}", colorize_change(line));
        }
    }
    if !report.low_confidence.is_empty() {
        println!("{}", "Low confidence changes:".bold());
        for line in &report.low_confidence {
            println!("  {}", colorize_change(line));
        }
    }
    if !report.ignored.is_empty() {
        println!("{}", "Ignored (volatile):".bold());
        for line in &report.ignored {
            println!("  {}", line.dimmed());
        }
    }
}

fn colorize_change(line: &str) -> colored::ColoredString {
    if line.starts_with("[+]") {
        line.green()
    } else if line.starts_with("[-]") {
        line.red()
    } else {
        line.yellow()
    }
}

fn render_exact(diff: &ExactDiff) {
    if diff.is_empty() {
        println!("{}", "No changes.".green());
        return;
    }
    for hunk in &diff.hunks {
        print_hunk(hunk);
    }
    println!(
        "{} additions, {} deletions",
        diff.additions().to_string().green(),
        diff.deletions().to_string().red()
    );
}

fn print_hunk(hunk: &Hunk) {
    println!(
        "{}",
        format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
        )
        .cyan()
    );
    for change in &hunk.changes {
        match change {
            LineChange::Context(line) => println!(" {}", line.dimmed()),
            LineChange::Added(line) => println!("{}", format!("+{line}").green()),
            LineChange::Removed(line) => println!("{}", format!("-{line}").red()),
        }
    }
}
