use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

/// Callback attached to a task, run with the accepted description text.
pub type TaskAction = Rc<dyn Fn(&Task, &str)>;

#[derive(Clone, Default, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(skip)]
    pub action: Option<TaskAction>,
}

impl Task {
    pub fn info(&self) -> String {
        format!("[Task name = {}]", self.name)
    }
}

// Tasks reach the app through the task file; these build them in tests.
#[cfg(test)]
impl Task {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Task {
            name: name.into(),
            desc: desc.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: TaskAction) -> Self {
        self.action = Some(action);
        self
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("desc", &self.desc)
            .field("action", &self.action.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Running,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Menu,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelButton {
    Accept,
    Abort,
    Reset,
}

impl PanelButton {
    pub const ALL: [PanelButton; 3] = [PanelButton::Accept, PanelButton::Abort, PanelButton::Reset];

    pub fn label(self) -> &'static str {
        match self {
            PanelButton::Accept => "Accept",
            PanelButton::Abort => "Abort",
            PanelButton::Reset => "Reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainTab {
    Spell,
    Logs,
}

impl MainTab {
    pub const ALL: [MainTab; 2] = [MainTab::Spell, MainTab::Logs];

    pub fn title(self) -> &'static str {
        match self {
            MainTab::Spell => "Spell",
            MainTab::Logs => "Logs",
        }
    }

    pub fn index(self) -> usize {
        match self {
            MainTab::Spell => 0,
            MainTab::Logs => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            MainTab::Spell => MainTab::Logs,
            MainTab::Logs => MainTab::Spell,
        }
    }
}
