//! Chord string parser.
//!
//! Parses human-readable chords like "Ctrl+Shift+K" into [`ChordArgs`].
//! Named modifiers become required; the rest keep their default (forbidden).
//! The key segment is kept exactly as typed and normalized at match time.

use par_hotkeys_config::{ChordArgs, ModifierArg};
use std::fmt;

/// Error type for chord parsing failures.
#[derive(Debug, Clone)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

fn parse_modifier(s: &str) -> Option<Modifier> {
    match s.to_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifier::Ctrl),
        "alt" | "option" => Some(Modifier::Alt),
        "shift" => Some(Modifier::Shift),
        "meta" | "cmd" | "command" | "super" | "win" => Some(Modifier::Meta),
        _ => None,
    }
}

/// Parse a chord string.
///
/// Format: `Modifier+Modifier+Key`, case-insensitive for modifiers.
///
/// Modifiers:
/// - `Ctrl`, `Control`
/// - `Alt`, `Option`
/// - `Shift`
/// - `Meta`, `Cmd`, `Command`, `Super`, `Win`
///
/// The key is any key name the matcher understands (`K`, `Enter`, `Esc`,
/// `ArrowLeft`, `F5`, ...). Use `++` at the end for the plus key
/// (`Ctrl++`).
pub fn parse_chord(s: &str) -> Result<ChordArgs, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError("Empty chord".to_string()));
    }

    let (modifier_part, key) = if s == "+" {
        ("", "+")
    } else if let Some(prefix) = s.strip_suffix("++") {
        (prefix, "+")
    } else {
        match s.rsplit_once('+') {
            Some((prefix, key)) => (prefix, key.trim()),
            None => ("", s),
        }
    };

    if key.is_empty() {
        return Err(ParseError(format!("No key specified in '{}'", s)));
    }
    if parse_modifier(key).is_some() {
        return Err(ParseError(
            "Chord ends with modifier, no key specified".to_string(),
        ));
    }

    let mut args = ChordArgs::new().with_key(key);
    for part in modifier_part.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        let required = Some(ModifierArg::Flag(true));
        match parse_modifier(part) {
            Some(Modifier::Ctrl) => args.ctrl = required,
            Some(Modifier::Alt) => args.alt = required,
            Some(Modifier::Shift) => args.shift = required,
            Some(Modifier::Meta) => args.meta = required,
            None => {
                return Err(ParseError(format!(
                    "Multiple keys specified: '{}' is not a modifier",
                    part
                )));
            }
        }
    }

    Ok(args)
}
