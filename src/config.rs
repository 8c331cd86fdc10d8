use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

pub const ICON_FILE: &str = "magic-prompt.png";
pub const WINDOW_TITLE: &str = "Magic Prompt v0.1 (c) UltraX AI";

#[derive(Debug, Clone)]
pub struct Config {
    pub tasks_file: Option<PathBuf>,
    pub resource_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub tick_rate: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            tasks_file: cli.tasks.clone(),
            resource_dir: cli.resource_dir.clone(),
            log_file: cli.log_file.clone(),
            tick_rate: Duration::from_millis(cli.tick_rate_ms),
        }
    }

    pub fn icon_path(&self) -> PathBuf {
        self.resource_dir.join(ICON_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tasks_file: None,
            resource_dir: PathBuf::from("rsc"),
            log_file: None,
            tick_rate: Duration::from_millis(250),
        }
    }
}

/// Returns the icon path if it exists. A missing icon is only worth a warning.
pub fn find_icon(config: &Config) -> Option<PathBuf> {
    let path = config.icon_path();
    if path.is_file() {
        Some(path)
    } else {
        log::warn!("Icon not found at {}", path.display());
        None
    }
}
