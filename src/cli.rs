use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON file with the tasks to show on the Spell tab
    #[arg(short = 't', long = "tasks", env = "MAGIC_PROMPT_TASKS", global = true)]
    pub tasks: Option<PathBuf>,

    /// Directory holding magic-prompt.png
    #[arg(long = "resource-dir", env = "MAGIC_PROMPT_RESOURCE_DIR", default_value = "rsc", global = true)]
    pub resource_dir: PathBuf,

    /// Write log records to this file (level from RUST_LOG)
    #[arg(long = "log-file", env = "MAGIC_PROMPT_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Event poll interval in milliseconds
    #[arg(long = "tick-rate-ms", env = "MAGIC_PROMPT_TICK_RATE_MS", default_value_t = 250, global = true)]
    pub tick_rate_ms: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the main window
    Run,
    /// Print the loaded tasks
    Tasks,
    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}
