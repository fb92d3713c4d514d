//! Typed error variants for the par-hotkeys-config crate.
//!
//! Only the hotkeys file layer can fail. Inbound chord arguments never
//! produce an error: malformed fields fall back to their defaults.

use thiserror::Error;

/// Errors that can occur when loading a hotkeys file.
///
/// # Example
///
/// ```rust,no_run
/// use par_hotkeys_config::{ConfigError, HotkeysConfig};
///
/// match HotkeysConfig::load_from(std::path::Path::new("hotkeys.yaml")) {
///     Ok(config) => println!("{} hotkeys", config.hotkeys.len()),
///     Err(ConfigError::Io(e)) => eprintln!("I/O error: {e}"),
///     Err(ConfigError::Parse(e)) => eprintln!("YAML parse error: {e}"),
///     Err(ConfigError::Validation(msg)) => eprintln!("Validation: {msg}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading the hotkeys file.
    #[error("I/O error reading hotkeys file: {0}")]
    Io(#[from] std::io::Error),

    /// The hotkeys file contained invalid YAML.
    #[error("YAML parse error in hotkeys file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A binding failed semantic validation (empty or duplicate name).
    #[error("Hotkeys validation error: {0}")]
    Validation(String),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
