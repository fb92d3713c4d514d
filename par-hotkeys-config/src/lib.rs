//! Configuration types for par-hotkeys.
//!
//! This crate provides:
//!
//! - `ChordArgs`: the lenient inbound field set an embedder sends
//! - `ChordSpec`: the resolved chord the matcher reads, and the reload rules
//!   that build a new spec from arguments
//! - `HotkeysConfig`: a YAML file of named chord declarations
//! - `HotkeysWatcher`: hot reload for that file (feature `watcher`)

pub mod chord;
pub mod defaults;
pub mod error;
pub mod hotkeys;
#[cfg(feature = "watcher")]
pub mod watcher;

pub use chord::{ChordArgs, ChordSpec, ModifierArg};
pub use error::{ConfigError, Result};
pub use hotkeys::{HotkeyBinding, HotkeysConfig};
#[cfg(feature = "watcher")]
pub use watcher::{HotkeysChanged, HotkeysWatcher};
