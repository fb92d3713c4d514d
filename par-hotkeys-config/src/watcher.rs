//! Hotkeys file watcher.
//!
//! Watches the hotkeys file and reports changes so the registry can be
//! re-declared. Rapid successive saves are debounced.

use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

/// The hotkeys file changed and should be re-read.
#[derive(Debug, Clone)]
pub struct HotkeysChanged {
    pub path: PathBuf,
}

/// Watches one hotkeys file and queues [`HotkeysChanged`] events.
pub struct HotkeysWatcher {
    // Dropping the watcher stops the notifications
    _watcher: Box<dyn Watcher + Send>,
    events: Receiver<HotkeysChanged>,
}

impl std::fmt::Debug for HotkeysWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotkeysWatcher").finish_non_exhaustive()
    }
}

/// Outcome of feeding one change event to [`Debounce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Debounced {
    /// Outside the window: report now.
    Send,
    /// Inside the window: report once after this delay.
    Defer(Duration),
    /// A deferred report is already scheduled and will cover this event.
    Coalesced,
}

/// Leading and trailing edge debounce.
///
/// The first change in a quiet period is reported immediately. Changes that
/// land inside the window collapse into a single report at its end, so the
/// last save is never lost.
#[derive(Debug, Default)]
struct Debounce {
    last_sent: Option<Instant>,
    trailing_pending: bool,
}

impl Debounce {
    fn on_event(&mut self, now: Instant, window: Duration) -> Debounced {
        if self.trailing_pending {
            return Debounced::Coalesced;
        }
        match self.last_sent {
            Some(previous) if now.duration_since(previous) < window => {
                self.trailing_pending = true;
                Debounced::Defer(window - now.duration_since(previous))
            }
            _ => {
                self.last_sent = Some(now);
                Debounced::Send
            }
        }
    }

    /// Record that the deferred report went out at `now`.
    fn flush(&mut self, now: Instant) {
        self.trailing_pending = false;
        self.last_sent = Some(now);
    }
}

/// Shared filter/debounce state for both watcher backends.
#[derive(Clone)]
struct ChangeFilter {
    filename: OsString,
    path: PathBuf,
    debounce: Duration,
    state: Arc<Mutex<Debounce>>,
    tx: Sender<HotkeysChanged>,
}

impl ChangeFilter {
    fn handle(&self, result: notify::Result<Event>) {
        let Ok(event) = result else {
            return;
        };

        // Editors that save atomically produce Create rather than Modify
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }

        let ours = event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|f| f == self.filename));
        if !ours {
            return;
        }

        let action = self.state.lock().on_event(Instant::now(), self.debounce);
        match action {
            Debounced::Send => self.send(),
            Debounced::Coalesced => log::trace!("Debouncing hotkeys change event"),
            Debounced::Defer(delay) => {
                log::trace!("Deferring hotkeys change event by {:?}", delay);
                let filter = self.clone();
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    filter.state.lock().flush(Instant::now());
                    filter.send();
                });
            }
        }
    }

    fn send(&self) {
        log::info!("Hotkeys file changed: {}", self.path.display());
        if let Err(e) = self.tx.send(HotkeysChanged {
            path: self.path.clone(),
        }) {
            log::error!("Failed to queue hotkeys change event: {}", e);
        }
    }
}

impl HotkeysWatcher {
    /// Start watching `path`.
    ///
    /// Uses the platform's native watcher, falling back to a 500 ms
    /// `PollWatcher` where the native backend is unavailable (containers,
    /// network filesystems).
    ///
    /// # Errors
    /// Fails if the file does not exist or neither backend can watch it.
    pub fn new(path: &Path, debounce_ms: u64) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Hotkeys file not found: {}", path.display());
        }

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let filename = canonical
            .file_name()
            .context("Hotkeys path has no filename")?
            .to_os_string();
        let parent = canonical
            .parent()
            .context("Hotkeys path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = channel();
        let filter = ChangeFilter {
            filename,
            path: canonical.clone(),
            debounce: Duration::from_millis(debounce_ms),
            state: Arc::new(Mutex::new(Debounce::default())),
            tx,
        };

        let mut watcher = Self::create_backend(filter)?;
        // Watch the directory so atomic renames onto the file are seen
        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch hotkeys directory: {}", parent.display()))?;

        log::info!("Hotkeys hot reload: watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            events: rx,
        })
    }

    fn create_backend(filter: ChangeFilter) -> Result<Box<dyn Watcher + Send>> {
        let native = filter.clone();
        match notify::recommended_watcher(move |res: notify::Result<Event>| native.handle(res)) {
            Ok(w) => {
                log::debug!("Hotkeys watcher: using native backend");
                Ok(Box::new(w))
            }
            Err(e) => {
                log::warn!(
                    "Hotkeys watcher: native backend unavailable ({}); falling back to PollWatcher",
                    e
                );
                let poll = PollWatcher::new(
                    move |res: notify::Result<Event>| filter.handle(res),
                    NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                )
                .context("Failed to create fallback PollWatcher")?;
                Ok(Box::new(poll))
            }
        }
    }

    /// Next pending change, if any (non-blocking).
    pub fn try_recv(&self) -> Option<HotkeysChanged> {
        self.events.try_recv().ok()
    }
}
