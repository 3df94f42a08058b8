//! Keyboard shortcut mapping

use serde::{Deserialize, Serialize};

use crate::viewport::viewpoint::ViewPreset;

/// A key press as reported by the host (DOM `KeyboardEvent` naming)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyInput {
    /// Logical key, e.g. `z`, `Delete`, `Home`, `7`
    pub key: String,
    /// Physical key, e.g. `Numpad7`
    #[serde(default)]
    pub code: Option<String>,
    /// Ctrl, or Cmd on macOS
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            ctrl: true,
            ..Self::new(key)
        }
    }

    pub fn ctrl_shift(key: &str) -> Self {
        Self {
            shift: true,
            ..Self::ctrl(key)
        }
    }

    fn is(&self, letter: char) -> bool {
        let mut chars = self.key.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }

    /// Digit from the main row or the numpad
    fn digit(&self) -> Option<u32> {
        if let Some(d) = self.code.as_deref().and_then(|c| c.strip_prefix("Numpad")) {
            if let Ok(n) = d.parse() {
                return Some(n);
            }
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(10),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    Undo,
    Redo,
    Save,
    DeleteSelected,
    Copy,
    Paste,
    ResetView,
    View(ViewPreset),
}

/// Map a key press to an editor shortcut
pub fn shortcut_for(input: &KeyInput) -> Option<Shortcut> {
    if input.ctrl {
        // Ctrl+Z — undo, Ctrl+Shift+Z or Ctrl+Y — redo
        if input.is('z') {
            return Some(if input.shift { Shortcut::Redo } else { Shortcut::Undo });
        }
        if input.is('y') {
            return Some(Shortcut::Redo);
        }
        if input.is('s') {
            return Some(Shortcut::Save);
        }
        if input.is('c') {
            return Some(Shortcut::Copy);
        }
        if input.is('v') {
            return Some(Shortcut::Paste);
        }
        return None;
    }

    match input.key.as_str() {
        "Delete" | "Backspace" => return Some(Shortcut::DeleteSelected),
        "Home" => return Some(Shortcut::ResetView),
        _ => {}
    }

    let preset = match input.digit()? {
        0 => ViewPreset::Isometric,
        1 => ViewPreset::Front,
        3 => ViewPreset::Right,
        5 => ViewPreset::Back,
        7 => ViewPreset::Top,
        9 => ViewPreset::Left,
        _ => return None,
    };
    Some(Shortcut::View(preset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_shortcuts() {
        assert_eq!(shortcut_for(&KeyInput::ctrl("z")), Some(Shortcut::Undo));
        assert_eq!(shortcut_for(&KeyInput::ctrl("Z")), Some(Shortcut::Undo));
        assert_eq!(shortcut_for(&KeyInput::ctrl_shift("Z")), Some(Shortcut::Redo));
        assert_eq!(shortcut_for(&KeyInput::ctrl("y")), Some(Shortcut::Redo));
        assert_eq!(shortcut_for(&KeyInput::new("z")), None);
    }

    #[test]
    fn editing_shortcuts() {
        assert_eq!(shortcut_for(&KeyInput::new("Delete")), Some(Shortcut::DeleteSelected));
        assert_eq!(shortcut_for(&KeyInput::new("Backspace")), Some(Shortcut::DeleteSelected));
        assert_eq!(shortcut_for(&KeyInput::ctrl("s")), Some(Shortcut::Save));
        assert_eq!(shortcut_for(&KeyInput::ctrl("c")), Some(Shortcut::Copy));
        assert_eq!(shortcut_for(&KeyInput::ctrl("v")), Some(Shortcut::Paste));
    }

    #[test]
    fn view_shortcuts() {
        assert_eq!(shortcut_for(&KeyInput::new("Home")), Some(Shortcut::ResetView));
        assert_eq!(shortcut_for(&KeyInput::new("7")), Some(Shortcut::View(ViewPreset::Top)));
        let numpad = KeyInput {
            key: "Home".into(),
            code: Some("Numpad7".into()),
            ..KeyInput::default()
        };
        // Numpad with NumLock off reports navigation keys
        assert_eq!(shortcut_for(&numpad), Some(Shortcut::ResetView));
        let numpad = KeyInput {
            key: "1".into(),
            code: Some("Numpad1".into()),
            ..KeyInput::default()
        };
        assert_eq!(shortcut_for(&numpad), Some(Shortcut::View(ViewPreset::Front)));
        assert_eq!(shortcut_for(&KeyInput::new("2")), None);
    }
}
