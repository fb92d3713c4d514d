//! Command-line interface for par-hotkeys.
//!
//! This module handles CLI argument parsing and the `check` subcommand.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use par_hotkeys_config::{ChordSpec, HotkeysConfig};
use std::path::{Path, PathBuf};

/// par-hotkeys - Edge-triggered keyboard chord detection
#[derive(Parser, Debug)]
#[command(name = "par-hotkeys")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Hotkeys file (default: <config_dir>/par-hotkeys/hotkeys.yaml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Extra chord to listen for, e.g. "Ctrl+Shift+K"
    #[arg(long, value_name = "CHORD")]
    pub chord: Option<String>,

    /// Name reported for --chord
    #[arg(long, value_name = "NAME", default_value = "chord")]
    pub name: String,

    /// Log level (overrides RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Do not reload the hotkeys file when it changes
    #[arg(long)]
    pub no_watch: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the hotkeys file and print the resolved chords
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    /// Explicit hotkeys file; `None` means the default path, if it exists
    pub config_path: Option<PathBuf>,
    /// Chord string from --chord
    pub chord: Option<String>,
    /// Binding name for --chord
    pub chord_name: String,
    pub log_level: Option<LevelFilter>,
    /// Hot-reload the hotkeys file
    pub watch: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            chord: None,
            chord_name: "chord".to_string(),
            log_level: None,
            watch: true,
        }
    }
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            chord: cli.chord,
            chord_name: cli.name,
            log_level: cli.log_level.map(LevelFilter::from),
            watch: !cli.no_watch,
        }
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check) => {
            let path = cli.config.unwrap_or_else(HotkeysConfig::default_path);
            match check(&path) {
                Ok(()) => CliResult::Exit(0),
                Err(e) => {
                    eprintln!("par-hotkeys: error: {e:#}");
                    CliResult::Exit(1)
                }
            }
        }
        None => CliResult::Continue(RuntimeOptions::from(cli)),
    }
}

/// Validate a hotkeys file and print one resolved chord per line
fn check(path: &Path) -> anyhow::Result<()> {
    let config = HotkeysConfig::load_from(path)
        .with_context(|| format!("Failed to load hotkeys from {}", path.display()))?;

    println!("{}: {} hotkeys", path.display(), config.hotkeys.len());
    for binding in &config.hotkeys {
        println!("  {}: {}", binding.name, ChordSpec::from_args(&binding.args));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "par-hotkeys",
            "--chord",
            "Ctrl+K",
            "--name",
            "palette",
            "--log-level",
            "debug",
            "--no-watch",
        ])
        .unwrap();

        let options = RuntimeOptions::from(cli);
        assert_eq!(options.chord.as_deref(), Some("Ctrl+K"));
        assert_eq!(options.chord_name, "palette");
        assert_eq!(options.log_level, Some(LevelFilter::Debug));
        assert!(!options.watch);
        assert!(options.config_path.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["par-hotkeys"]).unwrap();
        assert!(cli.command.is_none());

        let options = RuntimeOptions::from(cli);
        assert_eq!(options.chord_name, "chord");
        assert!(options.watch);
        assert!(options.log_level.is_none());
    }

    #[test]
    fn test_check_subcommand() {
        let cli = Cli::try_parse_from(["par-hotkeys", "check", "--config", "hk.yaml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.config, Some(PathBuf::from("hk.yaml")));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["par-hotkeys", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_check_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hotkeys.yaml");

        fs::write(&path, "hotkeys:\n  - name: save\n    key: s\n    ctrl: true\n").unwrap();
        assert!(check(&path).is_ok());

        fs::write(&path, "hotkeys:\n  - name: a\n  - name: a\n").unwrap();
        assert!(check(&path).is_err());

        assert!(check(&temp.path().join("missing.yaml")).is_err());
    }
}
