use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::Task;

/// Reads a JSON array of `{"name": ..., "desc": ...}` objects.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file {}", path.display()))?;
    parse_tasks(&raw).with_context(|| format!("Invalid task file {}", path.display()))
}

pub fn parse_tasks(raw: &str) -> Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;
    log::debug!("Parsed {} tasks", tasks.len());
    Ok(tasks)
}
