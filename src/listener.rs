//! Listener lifecycle: one key-down handler bound to one chord.
//!
//! A listener is created ATTACHED and ends DETACHED, either through
//! [`HotkeyListener::detach`] or by being dropped. It never re-attaches.

use crate::embedder::Embedder;
use crate::pulse::Pulse;
use crate::store::ChordStore;
use crate::surface::{KeyDispatcher, KeyDown, KeySurface, ListenerToken};
use par_hotkeys_config::{ChordArgs, ChordSpec};
use par_hotkeys_keybindings::matches;
use parking_lot::Mutex;
use std::sync::Arc;

/// State shared between the listener and its registered handler.
struct Shared {
    store: ChordStore,
    pulse: Mutex<Pulse>,
    embedder: Arc<dyn Embedder>,
}

impl Shared {
    fn on_key_down(&self, key_down: &mut KeyDown<'_>) {
        let spec = self.store.load();
        if !matches(&spec, key_down.event) {
            return;
        }
        if spec.prevent_default {
            key_down.prevent_default();
        }
        *self.pulse.lock() = Pulse::Fired;
        log::debug!("Chord {} fired", spec);
        self.embedder.set_value(Some(true));
    }

    fn clear(&self) {
        *self.pulse.lock() = Pulse::Idle;
        self.embedder.set_value(None);
    }
}

pub struct HotkeyListener<S: KeySurface + ?Sized = KeyDispatcher> {
    surface: Arc<S>,
    token: Option<ListenerToken>,
    shared: Arc<Shared>,
}

impl<S: KeySurface + ?Sized> std::fmt::Debug for HotkeyListener<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotkeyListener")
            .field("spec", &self.shared.store.load())
            .field("pulse", &*self.shared.pulse.lock())
            .field("attached", &self.token.is_some())
            .finish()
    }
}

impl<S: KeySurface + ?Sized> HotkeyListener<S> {
    /// Register exactly one key-down handler on `surface`, signal readiness,
    /// then emit a cleared value.
    ///
    /// The chord starts unconfigured; call [`reload`](Self::reload) to set it.
    pub fn attach(surface: Arc<S>, embedder: Arc<dyn Embedder>) -> Self {
        let shared = Arc::new(Shared {
            store: ChordStore::new(),
            pulse: Mutex::new(Pulse::Idle),
            embedder,
        });

        let handler_state = Arc::clone(&shared);
        let token = surface.add_key_down_listener(Box::new(move |key_down: &mut KeyDown<'_>| {
            handler_state.on_key_down(key_down);
        }));

        shared.embedder.component_ready();
        shared.clear();

        Self {
            surface,
            token: Some(token),
            shared,
        }
    }

    /// Install a new chord from `args` and clear the pulse.
    ///
    /// Never registers a second handler.
    pub fn reload(&self, args: &ChordArgs) -> Arc<ChordSpec> {
        let spec = self.shared.store.reload(args);
        log::debug!("Chord reloaded: {}", spec);
        self.shared.clear();
        spec
    }

    pub fn spec(&self) -> Arc<ChordSpec> {
        self.shared.store.load()
    }

    pub fn pulse(&self) -> Pulse {
        *self.shared.pulse.lock()
    }

    /// Consume the pulse: returns whether the chord fired.
    ///
    /// A fired pulse is cleared and `None` is emitted; an idle pulse emits
    /// nothing, so polling is silent.
    pub fn take_pulse(&self) -> bool {
        let fired = std::mem::take(&mut *self.shared.pulse.lock()).is_fired();
        if fired {
            self.shared.embedder.set_value(None);
        }
        fired
    }

    pub fn is_attached(&self) -> bool {
        self.token.is_some()
    }

    /// Remove the handler from the surface. Safe to call more than once.
    pub fn detach(&mut self) {
        if let Some(token) = self.token.take()
            && !self.surface.remove_key_down_listener(token)
        {
            log::warn!("Key-down listener was already removed from the surface");
        }
    }
}

impl<S: KeySurface + ?Sized> Drop for HotkeyListener<S> {
    fn drop(&mut self) {
        self.detach();
    }
}
