//! Chord matching.
//!
//! Decides whether a key-down event fires a [`ChordSpec`]. Matching is a pure
//! function of the spec and the event; the spec is passed in explicitly so
//! nothing here touches shared state.
//!
//! Case rules are intentionally asymmetric:
//! - single-character logical keys compare case-insensitively
//! - named logical keys compare exactly after normalization
//! - physical codes compare exactly against the raw target, with no
//!   normalization at all (target `"s"` never matches code `"KeyS"`)

use crate::event::KeyboardEvent;
use crate::normalize::{NormalizedKey, normalize_key};
use par_hotkeys_config::ChordSpec;

/// Check one modifier against its tri-state requirement.
///
/// `None` is don't-care. Otherwise the modifier must be in exactly the
/// required state, so "forbidden" means observably up.
#[inline]
pub fn modifier_ok(required: Option<bool>, actual: bool) -> bool {
    match required {
        None => true,
        Some(required) => actual == required,
    }
}

/// Whether `event` fires `spec`.
pub fn matches(spec: &ChordSpec, event: &KeyboardEvent) -> bool {
    // A held key never double-fires
    if spec.ignore_repeat && event.repeat {
        return false;
    }

    let Some(target) = normalize_key(spec.target_key.as_deref()) else {
        return false;
    };
    if target.is_empty() {
        return false;
    }

    if !key_matches(spec, &target, event) {
        return false;
    }

    let ok = modifier_ok(spec.ctrl, event.ctrl_key)
        && modifier_ok(spec.alt, event.alt_key)
        && modifier_ok(spec.shift, event.shift_key)
        && modifier_ok(spec.meta, event.meta_key);

    if ok {
        log::trace!("Chord {} matched key={:?} code={:?}", spec, event.key, event.code);
    }
    ok
}

fn key_matches(spec: &ChordSpec, target: &NormalizedKey<'_>, event: &KeyboardEvent) -> bool {
    if spec.use_code {
        return spec.target_key.as_deref() == Some(event.code.as_str());
    }

    let Some(actual) = normalize_key(Some(&event.key)) else {
        return false;
    };

    match target {
        NormalizedKey::Char(wanted) => match actual.single_char() {
            // Lower-case again in case the actual value skipped normalization
            Some(c) => c.to_lowercase().eq(std::iter::once(*wanted)),
            None => false,
        },
        _ => actual == *target,
    }
}
