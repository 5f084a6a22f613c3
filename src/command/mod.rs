mod history;

use egui::{Key, KeyboardShortcut, Modifiers};
use serde::{Deserialize, Serialize};

pub use history::SnapshotHistory;

/// History actions the host can trigger from buttons, shortcuts or code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Undo,
    Redo,
}

impl Command {
    /// Keyboard bindings, most specific first: egui ignores an unrequested
    /// shift when matching, so `cmd+shift+z` must be checked before `cmd+z`.
    pub const SHORTCUTS: [(KeyboardShortcut, Command); 3] = [
        (
            KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z),
            Command::Redo,
        ),
        (KeyboardShortcut::new(Modifiers::COMMAND, Key::Z), Command::Undo),
        (KeyboardShortcut::new(Modifiers::COMMAND, Key::Y), Command::Redo),
    ];

    /// Maps a key combo to a command: `cmd/ctrl+Z` undoes, `cmd/ctrl+Y` and `cmd/ctrl+shift+Z` redo
    pub fn from_key_combo(key: Key, modifiers: Modifiers) -> Option<Self> {
        if !modifiers.command || modifiers.alt {
            return None;
        }
        match key {
            Key::Z if modifiers.shift => Some(Command::Redo),
            Key::Z => Some(Command::Undo),
            Key::Y => Some(Command::Redo),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::Undo => "Undo",
            Command::Redo => "Redo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_combos() {
        assert_eq!(Command::from_key_combo(Key::Z, Modifiers::COMMAND), Some(Command::Undo));
        assert_eq!(Command::from_key_combo(Key::Y, Modifiers::COMMAND), Some(Command::Redo));
        assert_eq!(
            Command::from_key_combo(Key::Z, Modifiers::COMMAND.plus(Modifiers::SHIFT)),
            Some(Command::Redo)
        );
    }

    #[test]
    fn test_plain_keys_are_not_commands() {
        assert_eq!(Command::from_key_combo(Key::Z, Modifiers::NONE), None);
        assert_eq!(Command::from_key_combo(Key::Y, Modifiers::SHIFT), None);
        assert_eq!(Command::from_key_combo(Key::X, Modifiers::COMMAND), None);
    }
}
