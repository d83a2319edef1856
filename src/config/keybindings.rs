//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_pane: Vec<String>,
    pub prev_pane: Vec<String>,
    pub select: Vec<String>,
    pub toggle_comments: Vec<String>,
    pub refresh: Vec<String>,
}

fn keys(bindings: &[&str]) -> Vec<String> {
    bindings.iter().map(|b| b.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_pane: keys(&["Tab"]),
            prev_pane: keys(&["BackTab", "Shift+Tab"]),
            select: keys(&["Enter"]),
            toggle_comments: keys(&["Space", "c"]),
            refresh: keys(&["R"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event. The first matching binding wins.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 8] = [
            (self.quit.as_slice(), Action::Quit),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.next_pane.as_slice(), Action::NextPane),
            (self.prev_pane.as_slice(), Action::PrevPane),
            (self.select.as_slice(), Action::Select),
            (self.toggle_comments.as_slice(), Action::ToggleComments),
            (self.refresh.as_slice(), Action::Refresh),
        ];

        table
            .into_iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| action)
            .unwrap_or(Action::None)
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "/"
/// - Special keys: "Enter", "Tab", "BackTab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = if parts.len() > 1 {
        // Parse modifiers
        for part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
        parts[parts.len() - 1]
    } else {
        s
    };

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    // Check for special keys (case-insensitive)
    match s.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        lower => lower
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| format!("Unknown key: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_chars_and_special_keys() {
        assert_eq!(parse_key_string("c").unwrap().code, KeyCode::Char('c'));
        assert_eq!(parse_key_string("R").unwrap().code, KeyCode::Char('R'));
        assert_eq!(parse_key_string("Space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("backtab").unwrap().code, KeyCode::BackTab);
        assert_eq!(parse_key_string("F7").unwrap().code, KeyCode::F(7));
        assert!(parse_key_string("F13").is_err());
        assert!(parse_key_string("Hyper").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+Alt+x").unwrap();
        assert_eq!(binding.code, KeyCode::Char('x'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL | KeyModifiers::ALT);
        assert!(parse_key_string("Meta+x").is_err());
    }

    #[test]
    fn test_shift_is_ignored_for_plain_bindings() {
        let binding = parse_key_string("R").unwrap();
        assert!(binding.matches(&key(KeyCode::Char('R'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_default_actions() {
        let config = KeybindingConfig::default();
        let none = KeyModifiers::NONE;

        assert_eq!(config.get_action(&key(KeyCode::Char(' '), none)), Action::ToggleComments);
        assert_eq!(config.get_action(&key(KeyCode::Char('c'), none)), Action::ToggleComments);
        assert_eq!(
            config.get_action(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(config.get_action(&key(KeyCode::Enter, none)), Action::Select);
        assert_eq!(config.get_action(&key(KeyCode::Down, none)), Action::MoveDown);
        assert_eq!(config.get_action(&key(KeyCode::Char('z'), none)), Action::None);
    }

    #[test]
    fn test_custom_bindings_from_toml() {
        let config: KeybindingConfig = toml::from_str("toggle_comments = [\"t\"]").unwrap();
        let none = KeyModifiers::NONE;
        assert_eq!(config.get_action(&key(KeyCode::Char('t'), none)), Action::ToggleComments);
        assert_eq!(config.get_action(&key(KeyCode::Char(' '), none)), Action::None);
        assert_eq!(config.refresh, vec!["R"]);
    }
}
