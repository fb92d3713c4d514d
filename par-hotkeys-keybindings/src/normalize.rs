//! Key-name normalization.
//!
//! Maps the many spellings of a key ("esc", "Escape", "ESC") onto one
//! canonical form so target keys and event keys can be compared.

use std::borrow::Cow;
use std::fmt;

/// Named keys that have an alias table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Escape,
    Enter,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Meta,
    Control,
    Alt,
    Shift,
}

impl KeyToken {
    pub const ALL: [KeyToken; 11] = [
        KeyToken::Escape,
        KeyToken::Enter,
        KeyToken::Tab,
        KeyToken::ArrowUp,
        KeyToken::ArrowDown,
        KeyToken::ArrowLeft,
        KeyToken::ArrowRight,
        KeyToken::Meta,
        KeyToken::Control,
        KeyToken::Alt,
        KeyToken::Shift,
    ];

    /// The token whose canonical spelling is exactly `s` (case-sensitive).
    pub fn from_canonical(s: &str) -> Option<KeyToken> {
        Self::ALL.into_iter().find(|token| token.as_str() == s)
    }

    /// Canonical spelling (matches the DOM `KeyboardEvent.key` value).
    pub fn as_str(self) -> &'static str {
        match self {
            KeyToken::Escape => "Escape",
            KeyToken::Enter => "Enter",
            KeyToken::Tab => "Tab",
            KeyToken::ArrowUp => "ArrowUp",
            KeyToken::ArrowDown => "ArrowDown",
            KeyToken::ArrowLeft => "ArrowLeft",
            KeyToken::ArrowRight => "ArrowRight",
            KeyToken::Meta => "Meta",
            KeyToken::Control => "Control",
            KeyToken::Alt => "Alt",
            KeyToken::Shift => "Shift",
        }
    }
}

/// Canonical form of a key name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedKey<'a> {
    /// A single lower-cased character. Space is `' '`.
    Char(char),
    /// An aliased named key
    Named(KeyToken),
    /// Anything else, passed through with its original casing
    Other(Cow<'a, str>),
}

impl NormalizedKey<'_> {
    /// The empty passthrough, which counts as "no key".
    pub fn is_empty(&self) -> bool {
        matches!(self, NormalizedKey::Other(s) if s.is_empty())
    }

    /// The character, if this key is exactly one character long.
    pub fn single_char(&self) -> Option<char> {
        match self {
            NormalizedKey::Char(c) => Some(*c),
            NormalizedKey::Named(_) => None,
            NormalizedKey::Other(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for NormalizedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedKey::Char(c) => write!(f, "{}", c),
            NormalizedKey::Named(token) => f.write_str(token.as_str()),
            NormalizedKey::Other(s) => f.write_str(s),
        }
    }
}

/// Look up a lower-cased spelling in the alias table.
fn alias(lower: &str) -> Option<NormalizedKey<'static>> {
    let key = match lower {
        "esc" | "escape" => NormalizedKey::Named(KeyToken::Escape),
        " " | "space" => NormalizedKey::Char(' '),
        "enter" | "return" => NormalizedKey::Named(KeyToken::Enter),
        "tab" => NormalizedKey::Named(KeyToken::Tab),
        "up" => NormalizedKey::Named(KeyToken::ArrowUp),
        "down" => NormalizedKey::Named(KeyToken::ArrowDown),
        "left" => NormalizedKey::Named(KeyToken::ArrowLeft),
        "right" => NormalizedKey::Named(KeyToken::ArrowRight),
        "cmd" | "command" | "win" | "meta" => NormalizedKey::Named(KeyToken::Meta),
        "control" | "ctrl" => NormalizedKey::Named(KeyToken::Control),
        "alt" | "option" => NormalizedKey::Named(KeyToken::Alt),
        "shift" => NormalizedKey::Named(KeyToken::Shift),
        _ => return None,
    };
    Some(key)
}

/// Normalize a raw key name.
///
/// - `None` stays `None`.
/// - Aliases ("esc", "Return", "cmd", ...) map to their canonical token.
/// - Any other single character is lower-cased.
/// - Anything else passes through unchanged, so key names without an alias
///   entry (e.g. "F5", "PageDown") still work.
pub fn normalize_key(raw: Option<&str>) -> Option<NormalizedKey<'_>> {
    let raw = raw?;
    let lower = raw.to_lowercase();

    if let Some(key) = alias(&lower) {
        return Some(key);
    }

    let mut chars = raw.chars();
    if let (Some(_), None) = (chars.next(), chars.next()) {
        // Some characters lower-case to more than one char
        let mut lowered = lower.chars();
        return Some(match (lowered.next(), lowered.next()) {
            (Some(c), None) => NormalizedKey::Char(c),
            _ => NormalizedKey::Other(Cow::Owned(lower)),
        });
    }

    // Canonical spellings without an alias entry ("ArrowLeft") are the same
    // key as their aliases ("left")
    if let Some(token) = KeyToken::from_canonical(raw) {
        return Some(NormalizedKey::Named(token));
    }

    Some(NormalizedKey::Other(Cow::Borrowed(raw)))
}
