//! Edge-triggered pulse state.

/// Whether the chord has fired since the last clear.
///
/// Clearing is the lifecycle's job: every reload and every consumption via
/// `take_pulse` resets it to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pulse {
    #[default]
    Idle,
    Fired,
}

impl Pulse {
    /// Outbound value: `None` when idle, `Some(true)` when fired.
    pub fn value(self) -> Option<bool> {
        match self {
            Pulse::Idle => None,
            Pulse::Fired => Some(true),
        }
    }

    pub fn is_fired(self) -> bool {
        self == Pulse::Fired
    }
}
