//! Shared integration test helpers for par-hotkeys.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{RecordingEmbedder, Signal};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use par_hotkeys::{Embedder, HotkeyListener, KeyDispatcher};
use parking_lot::Mutex;
use std::sync::Arc;

/// One outbound signal, as seen by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Ready,
    Value(Option<bool>),
}

/// Embedder that records every signal in order.
#[derive(Debug, Default)]
pub struct RecordingEmbedder {
    signals: Mutex<Vec<Signal>>,
}

impl RecordingEmbedder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.signals.lock().clone()
    }

    /// Return and forget everything recorded so far.
    pub fn take(&self) -> Vec<Signal> {
        std::mem::take(&mut *self.signals.lock())
    }

    pub fn last_value(&self) -> Option<Option<bool>> {
        self.signals.lock().iter().rev().find_map(|signal| match signal {
            Signal::Value(value) => Some(*value),
            Signal::Ready => None,
        })
    }
}

impl Embedder for RecordingEmbedder {
    fn component_ready(&self) {
        self.signals.lock().push(Signal::Ready);
    }

    fn set_value(&self, value: Option<bool>) {
        self.signals.lock().push(Signal::Value(value));
    }
}

/// A dispatcher with one attached listener reporting to a recorder.
pub fn attached_listener() -> (Arc<KeyDispatcher>, HotkeyListener, Arc<RecordingEmbedder>) {
    let dispatcher = Arc::new(KeyDispatcher::new());
    let recorder = RecordingEmbedder::new();
    let listener = HotkeyListener::attach(
        Arc::clone(&dispatcher),
        Arc::clone(&recorder) as Arc<dyn Embedder>,
    );
    (dispatcher, listener, recorder)
}
