//! Observed surface: the thing key-down listeners attach to.
//!
//! In a browser this is the parent document. Here it is any [`KeySurface`];
//! [`KeyDispatcher`] is the in-process implementation the app feeds with
//! winit keyboard input.

use par_hotkeys_keybindings::KeyboardEvent;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// A key-down event as seen by a listener.
///
/// Listeners may suppress the surface's default handling of the key.
#[derive(Debug)]
pub struct KeyDown<'a> {
    pub event: &'a KeyboardEvent,
    default_prevented: bool,
}

impl<'a> KeyDown<'a> {
    pub fn new(event: &'a KeyboardEvent) -> Self {
        Self {
            event,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle returned by [`KeySurface::add_key_down_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

pub type KeyDownHandler = Box<dyn FnMut(&mut KeyDown<'_>) + Send>;

pub trait KeySurface: Send + Sync {
    fn add_key_down_listener(&self, handler: KeyDownHandler) -> ListenerToken;

    /// Returns `false` if the token was not registered.
    fn remove_key_down_listener(&self, token: ListenerToken) -> bool;
}

/// Key-down fan-out in registration order.
///
/// Handlers run while the listener list is locked, so a handler must not
/// add or remove listeners on the same dispatcher.
#[derive(Default)]
pub struct KeyDispatcher {
    next_token: AtomicU64,
    listeners: Mutex<Vec<(ListenerToken, KeyDownHandler)>>,
}

impl std::fmt::Debug for KeyDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl KeyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a key-down to every listener.
    ///
    /// Returns whether any listener prevented the default action.
    pub fn dispatch(&self, event: &KeyboardEvent) -> bool {
        let mut key_down = KeyDown::new(event);
        let mut listeners = self.listeners.lock();
        for (_, handler) in listeners.iter_mut() {
            handler(&mut key_down);
        }
        key_down.default_prevented()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl KeySurface for KeyDispatcher {
    fn add_key_down_listener(&self, handler: KeyDownHandler) -> ListenerToken {
        let token = ListenerToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((token, handler));
        token
    }

    fn remove_key_down_listener(&self, token: ListenerToken) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(t, _)| *t != token);
        listeners.len() != before
    }
}
