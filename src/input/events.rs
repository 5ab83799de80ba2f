//! Generic input event types for cross-backend compatibility.

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations map their native key codes to these generic
/// key values for unified input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// F1 function key
    F1,
    /// F10 function key (toggle help)
    F10,
    /// F12 function key (toggle status bar)
    F12,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used to match against configured keybindings.
    pub fn binding_name(self) -> Option<String> {
        let name = match self {
            Key::Char(c) => return Some(c.to_string()),
            Key::Escape => "Escape",
            Key::Return => "Return",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Space => "Space",
            Key::F1 => "F1",
            Key::F10 => "F10",
            Key::F12 => "F12",
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => return None,
        };
        Some(name.to_string())
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (draws)
    Left,
    /// Right mouse button (unused)
    Right,
    /// Middle mouse button (unused)
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_have_no_binding_name() {
        assert_eq!(Key::Ctrl.binding_name(), None);
        assert_eq!(Key::Char('+').binding_name().as_deref(), Some("+"));
        assert_eq!(Key::F10.binding_name().as_deref(), Some("F10"));
    }
}
