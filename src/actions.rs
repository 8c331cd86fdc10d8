use std::collections::BTreeMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    pub const fn ctrl(c: char) -> Self {
        Shortcut {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        // Shift is ignored so Ctrl+Shift+Q still quits.
        code == self.code && key.modifiers.difference(KeyModifiers::SHIFT) == self.modifiers
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
}

#[derive(Debug, Clone)]
pub struct Action {
    pub label: &'static str,
    pub shortcut: Shortcut,
    pub status_tip: &'static str,
    pub command: Command,
}

/// Named actions reachable from the menu bar and by keyboard shortcut.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    actions: BTreeMap<&'static str, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        let mut actions = BTreeMap::new();
        actions.insert(
            "quit",
            Action {
                label: "Quit",
                shortcut: Shortcut::ctrl('q'),
                status_tip: "Quit",
                command: Command::Quit,
            },
        );
        ActionRegistry { actions }
    }

    /// Menu entries in display order.
    pub fn menu_entries(&self) -> Vec<&Action> {
        self.actions.values().collect()
    }

    pub fn command_for(&self, key: &KeyEvent) -> Option<Command> {
        self.actions
            .values()
            .find(|action| action.shortcut.matches(key))
            .map(|action| action.command)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_registered_with_ctrl_q() {
        let registry = ActionRegistry::new();
        let entries = registry.menu_entries();
        assert_eq!(entries.len(), 1);
        let quit = entries[0];
        assert_eq!(quit.label, "Quit");
        assert_eq!(quit.status_tip, "Quit");
        assert_eq!(quit.shortcut.to_string(), "Ctrl+Q");
        assert_eq!(quit.command, Command::Quit);
    }

    #[test]
    fn shortcut_lookup() {
        let registry = ActionRegistry::new();
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        let ctrl_shift_q = KeyEvent::new(
            KeyCode::Char('Q'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        let plain_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);

        assert_eq!(registry.command_for(&ctrl_q), Some(Command::Quit));
        assert_eq!(registry.command_for(&ctrl_shift_q), Some(Command::Quit));
        assert_eq!(registry.command_for(&plain_q), None);
    }
}
