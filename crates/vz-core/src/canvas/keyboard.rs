//! Keyboard shortcuts for the dashboard canvas

use serde::{Deserialize, Serialize};

/// Keys the canvas reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Escape,
}

/// Modifier state at the time of the key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

/// Host platform, decides whether Cmd or Ctrl is the command modifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Mac,
    #[default]
    Other,
}

/// A key press as delivered by the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub platform: Platform,
    /// A text field currently owns keyboard focus
    pub text_input_focused: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            platform: Platform::Other,
            text_input_focused: false,
        }
    }

    /// Press with the platform's command modifier held
    pub fn command(key: Key, platform: Platform) -> Self {
        let modifiers = match platform {
            Platform::Mac => Modifiers { meta: true, ..Modifiers::default() },
            Platform::Other => Modifiers { ctrl: true, ..Modifiers::default() },
        };
        Self {
            key,
            modifiers,
            platform,
            text_input_focused: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.text_input_focused = true;
        self
    }

    fn command_held(&self) -> bool {
        match self.platform {
            Platform::Mac => self.modifiers.meta,
            Platform::Other => self.modifiers.ctrl,
        }
    }
}

/// Canvas action bound to a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasCommand {
    Undo,
    Redo,
    DeleteSelected,
    ClearSelection,
}

/// Map a key press to a canvas command.
///
/// Nothing fires while a text input has focus, so typing into a field never
/// edits the canvas.
pub fn command_for(event: &KeyEvent) -> Option<CanvasCommand> {
    if event.text_input_focused {
        return None;
    }

    match event.key {
        Key::Char(c) if event.command_held() => match c.to_ascii_lowercase() {
            'z' if event.modifiers.shift => Some(CanvasCommand::Redo),
            'z' => Some(CanvasCommand::Undo),
            'y' => Some(CanvasCommand::Redo),
            _ => None,
        },
        Key::Char(_) => None,
        Key::Delete | Key::Backspace => Some(CanvasCommand::DeleteSelected),
        Key::Escape => Some(CanvasCommand::ClearSelection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_bindings() {
        let undo = KeyEvent::command(Key::Char('z'), Platform::Other);
        assert_eq!(command_for(&undo), Some(CanvasCommand::Undo));

        let redo_shift = KeyEvent::command(Key::Char('Z'), Platform::Other).with_shift();
        assert_eq!(command_for(&redo_shift), Some(CanvasCommand::Redo));

        let redo_y = KeyEvent::command(Key::Char('y'), Platform::Mac);
        assert_eq!(command_for(&redo_y), Some(CanvasCommand::Redo));
    }

    #[test]
    fn test_platform_modifier() {
        // Ctrl on a Mac is not the command key
        let mut event = KeyEvent::new(Key::Char('z'));
        event.platform = Platform::Mac;
        event.modifiers.ctrl = true;
        assert_eq!(command_for(&event), None);

        let plain = KeyEvent::new(Key::Char('z'));
        assert_eq!(command_for(&plain), None);
    }

    #[test]
    fn test_suppressed_in_text_input() {
        for key in [Key::Delete, Key::Backspace, Key::Escape] {
            assert!(command_for(&KeyEvent::new(key)).is_some());
            assert_eq!(command_for(&KeyEvent::new(key).in_text_input()), None);
        }
        let undo = KeyEvent::command(Key::Char('z'), Platform::Other).in_text_input();
        assert_eq!(command_for(&undo), None);
    }
}
