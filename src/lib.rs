//! par-hotkeys: edge-triggered keyboard chord detection.
//!
//! A [`HotkeyListener`] attaches one key-down handler to a [`KeySurface`],
//! matches every key-down against its current chord, and reports a one-shot
//! pulse to its [`Embedder`]. Reloading the chord clears the pulse without
//! re-attaching. [`HotkeyRegistry`] manages several named listeners on a
//! shared surface.

pub mod app;
pub mod cli;
pub mod debug;
pub mod embedder;
pub mod listener;
pub mod pulse;
pub mod registry;
pub mod store;
pub mod surface;

pub use embedder::{BridgeMessage, Embedder, JsonLinesEmbedder, NullEmbedder};
pub use listener::HotkeyListener;
pub use pulse::Pulse;
pub use registry::{EmbedderFactory, HotkeyRegistry};
pub use store::ChordStore;
pub use surface::{KeyDispatcher, KeyDown, KeyDownHandler, KeySurface, ListenerToken};

pub use par_hotkeys_config::{ChordArgs, ChordSpec, HotkeyBinding, HotkeysConfig, ModifierArg};
pub use par_hotkeys_keybindings::{KeyboardEvent, matches, parse_chord};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
