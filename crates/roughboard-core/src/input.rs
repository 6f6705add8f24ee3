//! Input events delivered by the front-end.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// The platform command modifier (Ctrl, or Cmd on macOS).
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event with a surface-relative position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed { key: String, modifiers: Modifiers },
    Released { key: String, modifiers: Modifiers },
}

impl KeyEvent {
    /// Convenience constructor for a key press.
    pub fn pressed(key: impl Into<String>, modifiers: Modifiers) -> Self {
        KeyEvent::Pressed {
            key: key.into(),
            modifiers,
        }
    }
}

/// History action requested from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryCommand {
    Undo,
    Redo,
}

/// Map a key press to an undo/redo request.
///
/// Cmd/Ctrl+Z undoes, Cmd/Ctrl+Shift+Z and Cmd/Ctrl+Y redo. Keys are
/// compared case-insensitively since Shift turns "z" into "Z".
pub fn history_command(event: &KeyEvent) -> Option<HistoryCommand> {
    let KeyEvent::Pressed { key, modifiers } = event else {
        return None;
    };
    if !modifiers.command() {
        return None;
    }
    if key.eq_ignore_ascii_case("z") {
        Some(if modifiers.shift {
            HistoryCommand::Redo
        } else {
            HistoryCommand::Undo
        })
    } else if key.eq_ignore_ascii_case("y") {
        Some(HistoryCommand::Redo)
    } else {
        None
    }
}
