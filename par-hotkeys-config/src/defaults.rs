//! Default values for chord configuration.
//!
//! Every reload starts from these values, never from the previous spec
//! (the target key is the one exception, see [`crate::ChordSpec::reconfigured`]).

// ── Chord fields ───────────────────────────────────────────────────────────

/// Modifiers default to "forbidden", not "ignored".
pub fn modifier() -> Option<bool> {
    Some(false)
}

pub fn use_code() -> bool {
    false
}

pub fn ignore_repeat() -> bool {
    true
}

pub fn prevent_default() -> bool {
    false
}

// ── Hotkeys file ───────────────────────────────────────────────────────────

pub fn hotkeys_file_name() -> &'static str {
    "hotkeys.yaml"
}

/// Debounce window for hotkeys file change events.
pub fn watch_debounce_ms() -> u64 {
    100
}
