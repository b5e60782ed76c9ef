use serde::{Deserialize, Serialize};

use crate::navigation::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Space,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        meta: false,
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// The platform "Mod" key: Cmd on macOS, Ctrl elsewhere.
    pub fn is_mod(self) -> bool {
        self.meta || self.ctrl
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(
        key: Key,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            key,
            modifiers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Move(Direction),
    GoToDefinition,
    HistoryBack,
    HistoryForward,
    /// Consumed without effect so the host does not scroll the page.
    Swallow,
}

/// Command bound to `event`, or `None` when the viewer does not handle it.
pub fn command_for(event: &KeyEvent) -> Option<KeyCommand> {
    let modded = event.modifiers.is_mod();
    let command = match (&event.key, modded) {
        (Key::ArrowLeft, true) => KeyCommand::HistoryBack,
        (Key::ArrowRight, true) => KeyCommand::HistoryForward,
        (Key::ArrowLeft, false) => KeyCommand::Move(Direction::Left),
        (Key::ArrowRight, false) => KeyCommand::Move(Direction::Right),
        (Key::ArrowUp, false) => KeyCommand::Move(Direction::Up),
        (Key::ArrowDown, false) => KeyCommand::Move(Direction::Down),
        (Key::Enter, false) => KeyCommand::GoToDefinition,
        (Key::Space, false) => KeyCommand::Swallow,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
#[path = "../../tests/src/navigation/keymap_tests.rs"]
mod tests;
