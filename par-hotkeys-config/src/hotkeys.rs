//! Hotkeys file: a named list of chord declarations.
//!
//! ```yaml
//! hotkeys:
//!   - name: palette
//!     key: k
//!     ctrl: true
//!   - name: save
//!     key: s
//!     meta: true
//!     preventDefault: true
//! ```
//!
//! Each entry carries the same fields as an inbound [`ChordArgs`] plus a
//! unique `name`.

use crate::chord::ChordArgs;
use crate::defaults;
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One named chord declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HotkeyBinding {
    /// Identifier used to query the binding, e.g. "save"
    pub name: String,
    /// Chord arguments, as they would arrive from an embedder
    #[serde(flatten)]
    pub args: ChordArgs,
}

impl HotkeyBinding {
    pub fn new(name: impl Into<String>, args: ChordArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Contents of a hotkeys file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HotkeysConfig {
    #[serde(default)]
    pub hotkeys: Vec<HotkeyBinding>,
}

impl HotkeysConfig {
    /// Default location: `<config_dir>/par-hotkeys/hotkeys.yaml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("par-hotkeys")
            .join(defaults::hotkeys_file_name())
    }

    /// Load and validate a hotkeys file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading hotkeys from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        log::info!("Loaded {} hotkeys from {:?}", config.hotkeys.len(), path);
        Ok(config)
    }

    /// Parse and validate hotkeys from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document is an empty hotkeys list, not a parse error
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Names must be non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for binding in &self.hotkeys {
            let name = binding.name.trim();
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "hotkey name must not be empty".to_string(),
                ));
            }
            if !seen.insert(name) {
                return Err(ConfigError::Validation(format!(
                    "duplicate hotkey name '{}'",
                    name
                )));
            }
            if binding.args.supplied_key().is_none() {
                log::warn!(
                    "Hotkey '{}' has no key; it will never fire until one is set",
                    name
                );
            }
        }
        Ok(())
    }

    /// Append a binding, replacing any existing binding with the same name.
    pub fn upsert(&mut self, binding: HotkeyBinding) {
        match self.hotkeys.iter_mut().find(|b| b.name == binding.name) {
            Some(existing) => *existing = binding,
            None => self.hotkeys.push(binding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{ChordSpec, ModifierArg};
    use tempfile::TempDir;

    #[test]
    fn test_parse_hotkeys() {
        let yaml = r#"
hotkeys:
  - name: palette
    key: k
    ctrl: true
  - name: save
    key: s
    meta: true
    preventDefault: true
  - name: down
    key: ArrowDown
    ignore_repeat: false
    shift: any
"#;
        let config = HotkeysConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.hotkeys.len(), 3);

        assert_eq!(config.hotkeys[0].name, "palette");
        assert_eq!(config.hotkeys[0].args.supplied_key(), Some("k"));
        assert_eq!(config.hotkeys[0].args.ctrl, Some(ModifierArg::Flag(true)));

        let save = ChordSpec::from_args(&config.hotkeys[1].args);
        assert_eq!(save.meta, Some(true));
        assert!(save.prevent_default);

        let down = ChordSpec::from_args(&config.hotkeys[2].args);
        assert!(!down.ignore_repeat);
        assert_eq!(down.shift, None);
    }

    #[test]
    fn test_empty_document() {
        let config = HotkeysConfig::from_yaml("   \n").unwrap();
        assert!(config.hotkeys.is_empty());

        let config = HotkeysConfig::from_yaml("hotkeys: []\n").unwrap();
        assert!(config.hotkeys.is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = "hotkeys:\n  - name: a\n    key: a\n  - name: a\n    key: b\n";
        let err = HotkeysConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let yaml = "hotkeys:\n  - name: ''\n    key: a\n";
        let err = HotkeysConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = HotkeysConfig::from_yaml("hotkeys: [name: {").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_numeric_key_in_yaml() {
        let config = HotkeysConfig::from_yaml("hotkeys:\n  - name: one\n    key: 1\n").unwrap();
        assert_eq!(config.hotkeys[0].args.supplied_key(), Some("1"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("hotkeys.yaml");
        fs::write(&path, "hotkeys:\n  - name: esc\n    key: Esc\n").expect("write");

        let config = HotkeysConfig::load_from(&path).unwrap();
        assert_eq!(config.hotkeys.len(), 1);
        assert_eq!(config.hotkeys[0].args.supplied_key(), Some("Esc"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = HotkeysConfig::load_from(&temp_dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_upsert() {
        let mut config = HotkeysConfig::default();
        config.upsert(HotkeyBinding::new("a", ChordArgs::new().with_key("a")));
        config.upsert(HotkeyBinding::new("b", ChordArgs::new().with_key("b")));
        config.upsert(HotkeyBinding::new("a", ChordArgs::new().with_key("z")));
        assert_eq!(config.hotkeys.len(), 2);
        assert_eq!(config.hotkeys[0].args.supplied_key(), Some("z"));
    }

    #[test]
    fn test_default_path() {
        let path = HotkeysConfig::default_path();
        assert!(path.ends_with("par-hotkeys/hotkeys.yaml"));
    }
}
