//! Chord definition and the inbound argument set it is built from.
//!
//! `ChordArgs` is what an embedder sends on every (re)declaration of a chord.
//! `ChordSpec` is the fully-resolved record the matcher reads. A spec is never
//! mutated in place: each reload builds a fresh one via
//! [`ChordSpec::reconfigured`].

use crate::defaults;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::fmt;

// ============================================================================
// Inbound arguments
// ============================================================================

/// Requested policy for one modifier, as sent by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierArg {
    /// `true` = must be down, `false` = must be up
    Flag(bool),
    /// Modifier state is irrelevant
    Ignore,
}

impl ModifierArg {
    /// Resolve an optional argument into the spec's tri-state.
    ///
    /// Absent resolves to the default (forbidden), not to "ignored".
    pub fn resolve(arg: Option<ModifierArg>) -> Option<bool> {
        match arg {
            None => defaults::modifier(),
            Some(ModifierArg::Flag(required)) => Some(required),
            Some(ModifierArg::Ignore) => None,
        }
    }
}

impl From<bool> for ModifierArg {
    fn from(required: bool) -> Self {
        ModifierArg::Flag(required)
    }
}

impl From<Option<bool>> for ModifierArg {
    fn from(required: Option<bool>) -> Self {
        required.map_or(ModifierArg::Ignore, ModifierArg::Flag)
    }
}

/// The field set an embedder sends to (re)declare a chord.
///
/// Every field is optional. Decoding is lenient: a value of the wrong type
/// is treated as absent, and unknown fields are ignored. Keys are the
/// exception: any non-null key is supplied (scalars by their text form,
/// anything else as the empty key). Both the camelCase
/// wire names and snake_case aliases are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordArgs {
    /// Preferred spelling of the target key; wins over `key`.
    #[serde(default, alias = "target_key", deserialize_with = "lenient_key")]
    pub target_key: Option<String>,

    #[serde(default, deserialize_with = "lenient_key")]
    pub key: Option<String>,

    #[serde(default, deserialize_with = "lenient_modifier")]
    pub ctrl: Option<ModifierArg>,

    #[serde(default, deserialize_with = "lenient_modifier")]
    pub alt: Option<ModifierArg>,

    #[serde(default, deserialize_with = "lenient_modifier")]
    pub shift: Option<ModifierArg>,

    /// Cmd on macOS, Windows key on Windows
    #[serde(default, deserialize_with = "lenient_modifier")]
    pub meta: Option<ModifierArg>,

    #[serde(default, alias = "use_code", deserialize_with = "lenient")]
    pub use_code: Option<bool>,

    #[serde(default, alias = "ignore_repeat", deserialize_with = "lenient")]
    pub ignore_repeat: Option<bool>,

    #[serde(default, alias = "prevent_default", deserialize_with = "lenient")]
    pub prevent_default: Option<bool>,
}

impl ChordArgs {
    /// Create an empty argument set (every field absent).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.target_key = Some(key.into());
        self
    }

    pub fn with_ctrl(mut self, rule: impl Into<ModifierArg>) -> Self {
        self.ctrl = Some(rule.into());
        self
    }

    pub fn with_alt(mut self, rule: impl Into<ModifierArg>) -> Self {
        self.alt = Some(rule.into());
        self
    }

    pub fn with_shift(mut self, rule: impl Into<ModifierArg>) -> Self {
        self.shift = Some(rule.into());
        self
    }

    pub fn with_meta(mut self, rule: impl Into<ModifierArg>) -> Self {
        self.meta = Some(rule.into());
        self
    }

    pub fn with_use_code(mut self, use_code: bool) -> Self {
        self.use_code = Some(use_code);
        self
    }

    pub fn with_ignore_repeat(mut self, ignore_repeat: bool) -> Self {
        self.ignore_repeat = Some(ignore_repeat);
        self
    }

    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = Some(prevent_default);
        self
    }

    /// The supplied target key, if any (`targetKey` takes precedence over `key`).
    pub fn supplied_key(&self) -> Option<&str> {
        self.target_key.as_deref().or(self.key.as_deref())
    }
}

/// Decode `T`, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Valid(T),
        Invalid(IgnoredAny),
    }

    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Valid(value)) => Some(value),
        _ => None,
    })
}

fn lenient_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // Any non-null value counts as supplied, so a malformed key still
    // replaces the previous one instead of silently keeping it
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKey {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
        Other(IgnoredAny),
    }

    Ok(Option::<RawKey>::deserialize(deserializer)?.map(|raw| match raw {
        RawKey::Text(text) => text,
        RawKey::Unsigned(n) => n.to_string(),
        RawKey::Signed(n) => n.to_string(),
        RawKey::Float(n) => n.to_string(),
        RawKey::Flag(flag) => flag.to_string(),
        RawKey::Other(_) => {
            log::debug!("Key value is not a scalar; chord left unconfigured");
            String::new()
        }
    }))
}

fn lenient_modifier<'de, D>(deserializer: D) -> Result<Option<ModifierArg>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawModifier {
        Flag(bool),
        Word(String),
    }

    Ok(
        lenient::<D, RawModifier>(deserializer)?.and_then(|raw| match raw {
            RawModifier::Flag(required) => Some(ModifierArg::Flag(required)),
            RawModifier::Word(word) => match word.trim().to_lowercase().as_str() {
                "any" | "ignore" | "either" => Some(ModifierArg::Ignore),
                other => {
                    log::debug!("Ignoring unrecognized modifier value '{}'", other);
                    None
                }
            },
        }),
    )
}

// ============================================================================
// Resolved spec
// ============================================================================

/// The active chord: target key, modifier tri-states and matching policy.
///
/// Modifier fields: `Some(true)` = required down, `Some(false)` = required up,
/// `None` = ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSpec {
    /// Un-normalized key as supplied by the embedder. `None` or empty never matches.
    pub target_key: Option<String>,
    /// Compare against the physical key code instead of the logical key.
    pub use_code: bool,
    pub ctrl: Option<bool>,
    pub alt: Option<bool>,
    pub shift: Option<bool>,
    pub meta: Option<bool>,
    /// Auto-repeat events never match.
    pub ignore_repeat: bool,
    /// A matching event suppresses the host's default action.
    pub prevent_default: bool,
}

impl Default for ChordSpec {
    fn default() -> Self {
        Self {
            target_key: None,
            use_code: defaults::use_code(),
            ctrl: defaults::modifier(),
            alt: defaults::modifier(),
            shift: defaults::modifier(),
            meta: defaults::modifier(),
            ignore_repeat: defaults::ignore_repeat(),
            prevent_default: defaults::prevent_default(),
        }
    }
}

impl ChordSpec {
    /// Build a spec from scratch (no previous target key to fall back on).
    pub fn from_args(args: &ChordArgs) -> Self {
        Self::default().reconfigured(args)
    }

    /// Build the spec that replaces `self` after a reload with `args`.
    ///
    /// Every field is taken from `args` or its default. The only value carried
    /// over from `self` is the target key, and only when `args` supplies
    /// neither `targetKey` nor `key`.
    pub fn reconfigured(&self, args: &ChordArgs) -> Self {
        let target_key = match args.supplied_key() {
            Some(key) => Some(key.to_string()),
            None => self.target_key.clone(),
        };

        Self {
            target_key,
            use_code: args.use_code.unwrap_or_else(defaults::use_code),
            ctrl: ModifierArg::resolve(args.ctrl),
            alt: ModifierArg::resolve(args.alt),
            shift: ModifierArg::resolve(args.shift),
            meta: ModifierArg::resolve(args.meta),
            ignore_repeat: args.ignore_repeat.unwrap_or_else(defaults::ignore_repeat),
            prevent_default: args
                .prevent_default
                .unwrap_or_else(defaults::prevent_default),
        }
    }

    /// Whether a non-empty target key is configured.
    pub fn is_configured(&self) -> bool {
        self.target_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl fmt::Display for ChordSpec {
    /// Human-readable form for logs: `Ctrl+?Shift+"k"`.
    ///
    /// Required modifiers are listed bare, ignored ones with `?`. Forbidden
    /// modifiers are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for (name, rule) in [
            ("Ctrl", self.ctrl),
            ("Alt", self.alt),
            ("Shift", self.shift),
            ("Meta", self.meta),
        ] {
            match rule {
                Some(true) => parts.push(name.to_string()),
                None => parts.push(format!("?{}", name)),
                Some(false) => {}
            }
        }

        match &self.target_key {
            Some(key) if self.use_code => parts.push(format!("[{}]", key)),
            Some(key) => parts.push(format!("{:?}", key)),
            None => parts.push("<unset>".to_string()),
        }

        write!(f, "{}", parts.join("+"))
    }
}
