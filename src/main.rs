mod actions;
mod cli;
mod config;
mod controller;
mod editor;
mod log_sink;
mod logging;
mod models;
mod panel;
mod tasks;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use config::Config;
use ui::run_tui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);
    logging::init(config.log_file.as_deref())?;

    match cli.command {
        Some(Commands::Tasks) => {
            for task in load_configured_tasks(&config)? {
                println!("{}", task.info());
            }
        }
        Some(Commands::Completions { shell }) => {
            use clap_complete::{generate, Shell};
            let shell = shell.to_lowercase();
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "elvish" => Shell::Elvish,
                "powershell" => Shell::PowerShell,
                _ => {
                    println!("Unsupported shell: {}", shell);
                    return Ok(());
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "magic-prompt", &mut std::io::stdout());
        }
        Some(Commands::Run) | None => {
            let tasks = load_configured_tasks(&config)?;
            if let Some(icon) = config::find_icon(&config) {
                log::debug!("Using icon {}", icon.display());
            }
            log::info!("Starting with {} tasks", tasks.len());
            run_tui(&config, tasks)?;
        }
    }

    Ok(())
}

fn load_configured_tasks(config: &Config) -> Result<Vec<models::Task>> {
    match &config.tasks_file {
        Some(path) => tasks::load_tasks(path),
        None => Ok(Vec::new()),
    }
}
