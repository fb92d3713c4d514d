//! Configuration Store: the single active [`ChordSpec`].
//!
//! The spec is swapped wholesale on every reload, so a key-down handler
//! always sees either the old spec or the new one, never a mix.

use arc_swap::ArcSwap;
use par_hotkeys_config::{ChordArgs, ChordSpec};
use par_hotkeys_keybindings::{KeyboardEvent, matches};
use std::sync::Arc;

#[derive(Debug)]
pub struct ChordStore {
    current: ArcSwap<ChordSpec>,
}

impl Default for ChordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChordStore {
    /// Store holding the startup defaults (no chord configured).
    pub fn new() -> Self {
        Self::with_spec(ChordSpec::default())
    }

    pub fn with_spec(spec: ChordSpec) -> Self {
        Self {
            current: ArcSwap::from_pointee(spec),
        }
    }

    /// Snapshot of the active spec.
    pub fn load(&self) -> Arc<ChordSpec> {
        self.current.load_full()
    }

    /// Replace the active spec with one built from `args`.
    ///
    /// Returns the newly installed spec.
    pub fn reload(&self, args: &ChordArgs) -> Arc<ChordSpec> {
        // rcu retries if another reload lands in between, so the target key
        // is always carried over from the spec actually being replaced
        let mut installed = None;
        self.current.rcu(|current| {
            let next = Arc::new(current.reconfigured(args));
            installed = Some(Arc::clone(&next));
            next
        });
        installed.unwrap_or_else(|| self.current.load_full())
    }

    /// Match an event against the active spec.
    pub fn matches(&self, event: &KeyboardEvent) -> bool {
        matches(&self.current.load(), event)
    }
}
