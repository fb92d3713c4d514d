//! Host-independent key-down event.

/// A key-down event as seen by the matcher.
///
/// `key` and `code` use DOM spellings (`"k"`, `"Escape"`, `"KeyK"`). An
/// unknown value is the empty string, which never matches a configured chord.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Logical key (the character or label produced)
    pub key: String,
    /// Physical key position, independent of layout
    pub code: String,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub shift_key: bool,
    pub meta_key: bool,
    /// Set for auto-repeat while the key is held
    pub repeat: bool,
}

impl KeyboardEvent {
    /// Event for a logical key with no code and no modifiers held.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Event for a physical code with no logical key and no modifiers held.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_ctrl(mut self, down: bool) -> Self {
        self.ctrl_key = down;
        self
    }

    pub fn with_alt(mut self, down: bool) -> Self {
        self.alt_key = down;
        self
    }

    pub fn with_shift(mut self, down: bool) -> Self {
        self.shift_key = down;
        self
    }

    pub fn with_meta(mut self, down: bool) -> Self {
        self.meta_key = down;
        self
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }
}
