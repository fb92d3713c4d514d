//! Outbound bridge to the embedding application.
//!
//! The embedder receives one readiness signal after attach, then a stream of
//! values: `None` (cleared) or `Some(true)` (the chord fired).

use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

/// Receiver for a listener's readiness signal and pulse values.
pub trait Embedder: Send + Sync {
    /// The listener is attached; sent once, before any value.
    fn component_ready(&self);

    /// `None` = no pulse / cleared, `Some(true)` = the chord fired.
    fn set_value(&self, value: Option<bool>);
}

/// Embedder that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEmbedder;

impl Embedder for NullEmbedder {
    fn component_ready(&self) {}

    fn set_value(&self, _value: Option<bool>) {}
}

/// One line of the JSON-lines bridge protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeMessage<'a> {
    Ready { hotkey: &'a str },
    Value { hotkey: &'a str, value: Option<bool> },
}

/// Writes bridge messages as JSON lines, one object per line.
///
/// Several embedders (one per hotkey) can share the same writer.
pub struct JsonLinesEmbedder<W: Write + Send> {
    hotkey: String,
    out: Arc<Mutex<W>>,
}

impl<W: Write + Send> std::fmt::Debug for JsonLinesEmbedder<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesEmbedder")
            .field("hotkey", &self.hotkey)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send> JsonLinesEmbedder<W> {
    pub fn new(hotkey: impl Into<String>, out: Arc<Mutex<W>>) -> Self {
        Self {
            hotkey: hotkey.into(),
            out,
        }
    }

    fn send(&self, message: &BridgeMessage<'_>) {
        let mut out = self.out.lock();
        let result = serde_json::to_writer(&mut *out, message)
            .map_err(std::io::Error::from)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush());
        if let Err(e) = result {
            log::warn!("Failed to write bridge message for '{}': {}", self.hotkey, e);
        }
    }
}

impl JsonLinesEmbedder<std::io::Stdout> {
    /// Embedder writing to a shared stdout handle.
    pub fn stdout(hotkey: impl Into<String>, out: Arc<Mutex<std::io::Stdout>>) -> Self {
        Self::new(hotkey, out)
    }
}

impl<W: Write + Send> Embedder for JsonLinesEmbedder<W> {
    fn component_ready(&self) {
        self.send(&BridgeMessage::Ready {
            hotkey: &self.hotkey,
        });
    }

    fn set_value(&self, value: Option<bool>) {
        self.send(&BridgeMessage::Value {
            hotkey: &self.hotkey,
            value,
        });
    }
}
