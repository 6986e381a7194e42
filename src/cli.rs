use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cmd::Commands;

/// In-memory study task tracker.
/// Each run starts a fresh session; use `stm shell` to keep one open.
#[derive(Parser)]
#[command(name = "stm", version, about = "Study and project task tracker")]
pub struct Cli {
    /// Path to a JSON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference date instead of the local date (same formats as --deadline).
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Days ahead that count as urgent.
    #[arg(long, global = true)]
    pub urgent_days: Option<i64>,

    /// Start without the example tasks.
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// One line typed into the interactive shell.
#[derive(Parser)]
#[command(name = "stm", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    /// Print JSON for this command.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}
