use parking_lot::Mutex;
/// Logging bridge for par-hotkeys
///
/// Routes every `log::info!()` etc. to a debug log file:
/// /tmp/par_hotkeys_debug.log on Unix/macOS, %TEMP%\par_hotkeys_debug.log on Windows.
/// stdout carries the JSON-lines bridge, so log output never goes there.
///
/// When RUST_LOG is set, records are also mirrored to stderr.
///
/// Level precedence: CLI --log-level, then RUST_LOG, then info.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// Location of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp/par_hotkeys_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("par_hotkeys_debug.log");
    path
}

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn new() -> Self {
        let path = log_path();
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)
        {
            Ok(mut f) => {
                // Write header
                let _ = writeln!(
                    f,
                    "{}\npar-hotkeys session started at {}\n{}",
                    "=".repeat(80),
                    get_timestamp(),
                    "=".repeat(80)
                );
                Some(f)
            }
            // Logging is best effort; the app runs without a log file
            Err(_) => None,
        };

        Self {
            file: Mutex::new(file),
            mirror_stderr: std::env::var_os("RUST_LOG").is_some(),
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );

        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            let _ = std::io::stderr().write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Parse a level name as accepted by RUST_LOG's bare-level form.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Resolve the effective level from the CLI flag and RUST_LOG.
fn resolve_level(cli_level: Option<LevelFilter>, rust_log: Option<&str>) -> LevelFilter {
    cli_level
        .or_else(|| rust_log.and_then(parse_level))
        .unwrap_or(LevelFilter::Info)
}

/// Install the log bridge. Later calls only adjust the level.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref());

    let bridge = BRIDGE.get_or_init(LogBridge::new);
    // Fails only if another logger is already installed
    let _ = log::set_logger(bridge);
    log::set_max_level(level);
}
