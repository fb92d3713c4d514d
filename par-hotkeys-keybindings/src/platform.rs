//! winit → [`KeyboardEvent`] conversion.
//!
//! Produces DOM spellings so chords written for a browser host ("Escape",
//! "ArrowLeft", "KeyS", "MetaLeft") work unchanged against a native window.

use crate::event::KeyboardEvent;
use winit::event::{KeyEvent, Modifiers};
use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};

impl KeyboardEvent {
    /// Build a matcher event from a winit key event and the current modifiers.
    pub fn from_winit(event: &KeyEvent, modifiers: &Modifiers) -> Self {
        let state = modifiers.state();
        Self {
            key: logical_key_name(&event.logical_key),
            code: physical_code_name(event.physical_key),
            ctrl_key: state.control_key(),
            alt_key: state.alt_key(),
            shift_key: state.shift_key(),
            meta_key: state.super_key(),
            repeat: event.repeat,
        }
    }
}

/// DOM `KeyboardEvent.key` spelling of a winit logical key.
pub fn logical_key_name(key: &Key) -> String {
    match key {
        Key::Character(text) => text.to_string(),
        Key::Named(NamedKey::Space) => " ".to_string(),
        // winit's Super is the DOM's Meta
        Key::Named(NamedKey::Super) => "Meta".to_string(),
        Key::Named(named) => format!("{:?}", named),
        Key::Dead(_) => "Dead".to_string(),
        Key::Unidentified(_) => "Unidentified".to_string(),
    }
}

/// DOM `KeyboardEvent.code` spelling of a winit physical key.
///
/// Unidentified keys map to the empty string.
pub fn physical_code_name(key: PhysicalKey) -> String {
    match key {
        PhysicalKey::Code(KeyCode::SuperLeft) => "MetaLeft".to_string(),
        PhysicalKey::Code(KeyCode::SuperRight) => "MetaRight".to_string(),
        PhysicalKey::Code(code) => format!("{:?}", code),
        PhysicalKey::Unidentified(_) => String::new(),
    }
}
