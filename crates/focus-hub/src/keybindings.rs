//! Keybinding system
//!
//! Maps keyboard input to commands. Key patterns are textual (e.g. "ctrl+c",
//! "L", "enter") so the default keymap reads like a table.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command_id::CommandId;

/// A single keybinding that maps a key pattern to a command
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// Textual representation of the key - e.g. "ctrl+c", "down", "R"
    pub keys: String,
    /// Display hint for the UI - e.g. "Ctrl+C", "↓"
    pub hint: String,
    pub command: CommandId,
}

impl KeyBinding {
    pub fn new(keys: impl Into<String>, hint: impl Into<String>, command: CommandId) -> Self {
        Self {
            keys: keys.into(),
            hint: hint.into(),
            command,
        }
    }
}

/// Parsed key pattern for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Parse a textual key pattern into a matchable form
///
/// Supported formats:
/// - Single char: "q", "/", "R" (uppercase implies SHIFT)
/// - With modifiers: "ctrl+c", "alt+x"
/// - Special keys: "enter", "esc", "backspace", "up", "down", "tab"
pub fn parse_key_pattern(pattern: &str) -> Option<KeyPattern> {
    let pattern = pattern.trim();

    // Single characters keep their case
    if pattern.chars().count() == 1 {
        let c = pattern.chars().next()?;
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        return Some(KeyPattern {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let pattern_lower = pattern.to_lowercase();
    let mut modifiers = KeyModifiers::NONE;
    let mut key_part = pattern_lower.as_str();

    while let Some((modifier, rest)) = key_part.split_once('+') {
        match modifier {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => break,
        }
        key_part = rest;
    }

    let code = parse_key_code(key_part)?;
    Some(KeyPattern { code, modifiers })
}

fn parse_key_code(s: &str) -> Option<KeyCode> {
    match s {
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "backspace" | "bs" => Some(KeyCode::Backspace),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),
        s if s.chars().count() == 1 => s.chars().next().map(KeyCode::Char),
        _ => None,
    }
}

/// The keymap - a collection of keybindings with matching logic
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyBinding, KeyPattern)>,
}

impl Keymap {
    /// Create a keymap, skipping bindings whose pattern does not parse
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        let parsed = bindings
            .into_iter()
            .filter_map(|binding| match parse_key_pattern(&binding.keys) {
                Some(pattern) => Some((binding, pattern)),
                None => {
                    log::warn!("Ignoring unparsable key binding '{}'", binding.keys);
                    None
                }
            })
            .collect();

        Self { bindings: parsed }
    }

    /// Every command bound to `key`, in keymap order
    ///
    /// One key may carry several commands (e.g. `r` refreshes a card on the
    /// dashboard and retries verification on the sign-in screen); the active
    /// view picks the one it accepts.
    pub fn match_key(&self, key: &KeyEvent) -> Vec<CommandId> {
        self.bindings
            .iter()
            .filter(|(_, pattern)| {
                // Some terminals report uppercase chars without SHIFT
                let modifiers = match key.code {
                    KeyCode::Char(c) if c.is_ascii_uppercase() => key.modifiers | KeyModifiers::SHIFT,
                    _ => key.modifiers,
                };
                pattern.code == key.code && pattern.modifiers == modifiers
            })
            .map(|(binding, _)| binding.command)
            .collect()
    }

    /// Find the hint for a specific command (returns first match)
    pub fn hint_for_command(&self, command: CommandId) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(b, _)| b.command == command)
            .map(|(b, _)| b.hint.as_str())
    }

    /// Compact hint for a command (e.g., "j/↓" for NavigateNext)
    pub fn compact_hint_for_command(&self, command: CommandId) -> Option<String> {
        let mut hints: Vec<&str> = Vec::new();
        for (binding, _) in self.bindings.iter().filter(|(b, _)| b.command == command) {
            if !hints.contains(&binding.hint.as_str()) {
                hints.push(binding.hint.as_str());
            }
        }

        if hints.is_empty() {
            None
        } else {
            Some(hints.join("/"))
        }
    }
}
