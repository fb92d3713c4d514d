//! Named hotkeys sharing one surface.
//!
//! [`HotkeyRegistry::activate`] declares the full binding set; listeners are
//! reused by name so a re-activation behaves like a reload, not a re-attach.

use crate::embedder::{Embedder, NullEmbedder};
use crate::listener::HotkeyListener;
use crate::surface::{KeyDispatcher, KeySurface};
use par_hotkeys_config::HotkeyBinding;
use std::sync::Arc;

/// Builds the embedder for a newly attached hotkey, given its name.
pub type EmbedderFactory = Box<dyn Fn(&str) -> Arc<dyn Embedder> + Send + Sync>;

pub struct HotkeyRegistry<S: KeySurface + ?Sized = KeyDispatcher> {
    surface: Arc<S>,
    embedder_factory: EmbedderFactory,
    /// Listeners in binding order
    listeners: Vec<(String, HotkeyListener<S>)>,
}

impl<S: KeySurface + ?Sized> std::fmt::Debug for HotkeyRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotkeyRegistry")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

impl<S: KeySurface + ?Sized> HotkeyRegistry<S> {
    pub fn new(surface: Arc<S>, embedder_factory: EmbedderFactory) -> Self {
        Self {
            surface,
            embedder_factory,
            listeners: Vec::new(),
        }
    }

    /// Registry whose listeners report to nobody; query it with
    /// [`pressed`](Self::pressed) or [`drain_pressed`](Self::drain_pressed).
    pub fn silent(surface: Arc<S>) -> Self {
        Self::new(
            surface,
            Box::new(|_name: &str| -> Arc<dyn Embedder> {
                Arc::new(NullEmbedder)
            }),
        )
    }

    /// Replace the binding set.
    ///
    /// Existing names are reloaded, new names are attached then reloaded, and
    /// names missing from `bindings` are detached. A name repeated within
    /// `bindings` takes its last declaration.
    pub fn activate(&mut self, bindings: &[HotkeyBinding]) {
        let mut previous = std::mem::take(&mut self.listeners);
        let mut next: Vec<(String, HotkeyListener<S>)> = Vec::with_capacity(bindings.len());

        for binding in bindings {
            if let Some((_, listener)) = next.iter().find(|(name, _)| *name == binding.name) {
                log::warn!(
                    "Hotkey '{}' declared more than once; using the last declaration",
                    binding.name
                );
                listener.reload(&binding.args);
                continue;
            }

            let listener = match previous.iter().position(|(name, _)| *name == binding.name) {
                Some(index) => previous.remove(index).1,
                None => {
                    log::debug!("Attaching hotkey '{}'", binding.name);
                    let embedder = (self.embedder_factory)(&binding.name);
                    HotkeyListener::attach(Arc::clone(&self.surface), embedder)
                }
            };
            let spec = listener.reload(&binding.args);
            log::info!("Hotkey '{}' = {}", binding.name, spec);
            next.push((binding.name.clone(), listener));
        }

        for (name, _) in &previous {
            log::info!("Removing hotkey '{}'", name);
        }
        // Dropping the leftovers detaches them
        drop(previous);

        self.listeners = next;
    }

    /// Consume the pulse of `name`. Unknown names report `false`.
    pub fn pressed(&self, name: &str) -> bool {
        self.get(name).is_some_and(|listener| listener.take_pulse())
    }

    /// Consume every pending pulse; returns the names that fired, in
    /// binding order.
    pub fn drain_pressed(&self) -> Vec<String> {
        self.listeners
            .iter()
            .filter(|(_, listener)| listener.take_pulse())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&HotkeyListener<S>> {
        self.listeners
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, listener)| listener)
    }

    pub fn names(&self) -> Vec<&str> {
        self.listeners.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Detach every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use par_hotkeys_config::ChordArgs;
    use par_hotkeys_keybindings::KeyboardEvent;

    fn binding(name: &str, key: &str) -> HotkeyBinding {
        HotkeyBinding::new(name, ChordArgs::new().with_key(key))
    }

    #[test]
    fn test_activate_preserves_order() {
        let dispatcher = Arc::new(KeyDispatcher::new());
        let mut registry = HotkeyRegistry::silent(Arc::clone(&dispatcher));
        registry.activate(&[binding("b", "b"), binding("a", "a"), binding("c", "c")]);

        assert_eq!(registry.names(), vec!["b", "a", "c"]);
        assert_eq!(dispatcher.listener_count(), 3);
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let dispatcher = Arc::new(KeyDispatcher::new());
        let mut registry = HotkeyRegistry::silent(Arc::clone(&dispatcher));
        registry.activate(&[binding("x", "a"), binding("x", "b")]);

        assert_eq!(registry.len(), 1);
        assert_eq!(dispatcher.listener_count(), 1);
        let spec = registry.get("x").map(|l| l.spec());
        assert_eq!(spec.and_then(|s| s.target_key.clone()).as_deref(), Some("b"));
    }

    #[test]
    fn test_unknown_name_not_pressed() {
        let dispatcher = Arc::new(KeyDispatcher::new());
        let mut registry = HotkeyRegistry::silent(Arc::clone(&dispatcher));
        registry.activate(&[binding("a", "a")]);
        dispatcher.dispatch(&KeyboardEvent::key("a"));

        assert!(!registry.pressed("nope"));
        assert!(registry.pressed("a"));
    }

    #[test]
    fn test_clear_detaches_all() {
        let dispatcher = Arc::new(KeyDispatcher::new());
        let mut registry = HotkeyRegistry::silent(Arc::clone(&dispatcher));
        registry.activate(&[binding("a", "a"), binding("b", "b")]);
        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(dispatcher.listener_count(), 0);
    }
}
