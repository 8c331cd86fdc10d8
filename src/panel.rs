use crate::editor::TextEditor;
use crate::models::{PanelButton, Task};

/// Callbacks a task panel invokes on its owner when a disposition is chosen.
pub trait TaskHost {
    fn accept_task(&mut self, task: &Task, desc_text: &str);

    fn abort_task(&mut self, task: &Task);

    /// Restores the panel's buffer to the task's original description.
    fn reset_task(&mut self, task: &Task, desc: &mut TextEditor) {
        desc.set_content(&task.desc);
    }
}

/// One task presented for review, together with its editable description.
#[derive(Debug, Clone)]
pub struct TaskPanel {
    task: Task,
    pub desc: TextEditor,
}

impl TaskPanel {
    pub fn new(task: Task) -> Self {
        let desc = TextEditor::new(&task.desc);
        TaskPanel { task, desc }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn name_label(&self) -> String {
        format!("Name: {}", self.task.name)
    }

    pub fn desc_text(&self) -> String {
        self.desc.get_content()
    }

    pub fn accept(&self, host: &mut dyn TaskHost) {
        let text = self.desc_text();
        host.accept_task(&self.task, &text);
    }

    pub fn abort(&self, host: &mut dyn TaskHost) {
        host.abort_task(&self.task);
    }

    pub fn reset(&mut self, host: &mut dyn TaskHost) {
        host.reset_task(&self.task, &mut self.desc);
    }

    pub fn press(&mut self, button: PanelButton, host: &mut dyn TaskHost) {
        match button {
            PanelButton::Accept => self.accept(host),
            PanelButton::Abort => self.abort(host),
            PanelButton::Reset => self.reset(host),
        }
    }
}
