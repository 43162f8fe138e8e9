use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "netdrift",
    about = "Detect state drift in network device output",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Inventory file (defaults to ./netdrift.toml)
    #[arg(long, global = true)]
    pub inventory: Option<PathBuf>,

    /// Baseline directory (defaults to ~/.netdrift/baselines)
    #[arg(long, global = true)]
    pub baseline_dir: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two capture files
    Diff(DiffArgs),
    /// Save, list, or diff against stored baselines
    Baseline(BaselineArgs),
    /// List inventory devices
    Devices(DevicesArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// The older capture file
    pub old: PathBuf,
    /// The newer capture file
    pub new: PathBuf,
    /// Literal unified line diff instead of the heuristic state diff
    #[arg(long)]
    pub exact: bool,
}

#[derive(Args)]
pub struct BaselineArgs {
    #[command(subcommand)]
    pub action: BaselineAction,
}

#[derive(Subcommand)]
pub enum BaselineAction {
    /// Store a capture file as the baseline for a device command
    Save {
        device: String,
        command: String,
        file: PathBuf,
    },
    /// List stored baselines
    List,
    /// Compare a stored baseline against a fresh capture file
    Diff {
        device: String,
        command: String,
        file: PathBuf,
        /// Literal unified line diff instead of the heuristic state diff
        #[arg(long)]
        exact: bool,
    },
}

#[derive(Args)]
pub struct DevicesArgs {
    /// Resolve a device name, group name, or `all`
    #[arg(long)]
    pub target: Option<String>,
}
