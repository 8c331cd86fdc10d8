use crate::editor::TextEditor;
use crate::log_sink::LogSink;
use crate::models::Task;
use crate::panel::TaskHost;

/// Receives task dispositions from the panels and keeps the operational log.
#[derive(Debug, Default)]
pub struct Controller {
    pub logs: LogSink,
    status: String,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::info!("{}", msg);
        self.status = self.logs.append(msg);
    }

    /// Temporary status text, e.g. a menu entry's tip. Not recorded in the log.
    pub fn show_message(&mut self, msg: &str) {
        self.status = msg.to_string();
    }

    /// Puts the status line back to the newest log line.
    pub fn clear_message(&mut self) {
        self.status = self.logs.status_line().unwrap_or_default();
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl TaskHost for Controller {
    fn accept_task(&mut self, task: &Task, desc_text: &str) {
        log::info!("accept_task: {} {}", task.name, desc_text);
        self.add_log(format!("Task accepted: {}", task.name));
        if let Some(action) = &task.action {
            action(task, desc_text);
        }
    }

    fn abort_task(&mut self, task: &Task) {
        log::info!("abort_task: {}", task.name);
        self.add_log(format!("Task aborted: {}", task.name));
    }

    fn reset_task(&mut self, task: &Task, desc: &mut TextEditor) {
        desc.set_content(&task.desc);
        self.add_log(format!("Task reset: {}", task.name));
    }
}
