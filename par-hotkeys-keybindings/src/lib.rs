//! Chord matching engine for par-hotkeys.
//!
//! Decides whether a single key-down event fires a configured chord.
//!
//! Features:
//! - Key-name normalization (aliases like "Esc", "Return", "Cmd")
//! - Tri-state modifiers: required, forbidden or ignored per modifier
//! - Logical key or physical code matching
//! - Auto-repeat suppression
//! - winit event conversion and a "Ctrl+K" chord string parser

mod event;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod platform;

pub use event::KeyboardEvent;
pub use matcher::{matches, modifier_ok};
pub use normalize::{KeyToken, NormalizedKey, normalize_key};
pub use parser::{ParseError, parse_chord};
