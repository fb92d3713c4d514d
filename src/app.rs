//! Application module for par-hotkeys
//!
//! `HotkeysApp` opens one window as the observed surface, forwards its key
//! presses to the [`KeyDispatcher`], and reports every hotkey over the
//! JSON-lines bridge on stdout.

use crate::cli::RuntimeOptions;
use crate::embedder::{Embedder, JsonLinesEmbedder};
use crate::registry::HotkeyRegistry;
use crate::surface::KeyDispatcher;
use anyhow::{Context, Result};
use par_hotkeys_config::{HotkeyBinding, HotkeysConfig, HotkeysWatcher, defaults};
use par_hotkeys_keybindings::{KeyboardEvent, parse_chord};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Modifiers, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// How often the event loop wakes to check for hotkeys file changes
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Main application entry point
pub struct HotkeysApp {
    options: RuntimeOptions,
    dispatcher: Arc<KeyDispatcher>,
    registry: HotkeyRegistry,
    /// Hotkeys file in use, if any
    hotkeys_path: Option<PathBuf>,
    watcher: Option<HotkeysWatcher>,
    window: Option<Window>,
    modifiers: Modifiers,
}

impl HotkeysApp {
    /// Load bindings and attach one listener per hotkey
    pub fn new(options: RuntimeOptions) -> Result<Self> {
        let hotkeys_path = resolve_hotkeys_path(&options);
        let bindings = load_bindings(hotkeys_path.as_deref(), &options)?;
        if bindings.is_empty() {
            log::warn!(
                "No hotkeys configured; pass --chord or create {:?}",
                HotkeysConfig::default_path()
            );
        }

        let dispatcher = Arc::new(KeyDispatcher::new());
        let stdout = Arc::new(Mutex::new(std::io::stdout()));
        let mut registry = HotkeyRegistry::new(
            Arc::clone(&dispatcher),
            Box::new(move |name: &str| -> Arc<dyn Embedder> {
                Arc::new(JsonLinesEmbedder::stdout(name, Arc::clone(&stdout)))
            }),
        );
        registry.activate(&bindings);

        let watcher = match (&hotkeys_path, options.watch) {
            (Some(path), true) => match HotkeysWatcher::new(path, defaults::watch_debounce_ms()) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    log::warn!("Hot reload disabled: {:#}", e);
                    None
                }
            },
            _ => None,
        };

        Ok(Self {
            options,
            dispatcher,
            registry,
            hotkeys_path,
            watcher,
            window: None,
            modifiers: Modifiers::default(),
        })
    }

    /// Run the application
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    /// Re-read the hotkeys file. On failure the previous bindings stay active.
    fn reload_hotkeys(&mut self) {
        match load_bindings(self.hotkeys_path.as_deref(), &self.options) {
            Ok(bindings) => {
                log::info!("Hotkeys file changed; reloading {} hotkeys", bindings.len());
                self.registry.activate(&bindings);
            }
            Err(e) => {
                log::error!(
                    "Failed to reload hotkeys, keeping previous bindings: {:#}",
                    e
                );
            }
        }
    }

    fn handle_key_press(&self, event: &winit::event::KeyEvent) {
        let event = KeyboardEvent::from_winit(event, &self.modifiers);
        log::trace!("Key down: key={:?} code={:?}", event.key, event.code);
        if self.dispatcher.dispatch(&event) {
            log::debug!("Default action suppressed for {:?}", event.key);
        }
    }
}

/// Explicit --config path, else the default path when that file exists
fn resolve_hotkeys_path(options: &RuntimeOptions) -> Option<PathBuf> {
    match &options.config_path {
        Some(path) => Some(path.clone()),
        None => {
            let path = HotkeysConfig::default_path();
            path.exists().then_some(path)
        }
    }
}

/// Hotkeys file bindings plus the --chord binding, if given
fn load_bindings(
    path: Option<&std::path::Path>,
    options: &RuntimeOptions,
) -> Result<Vec<HotkeyBinding>> {
    let mut config = match path {
        Some(path) => HotkeysConfig::load_from(path)
            .with_context(|| format!("Failed to load hotkeys from {}", path.display()))?,
        None => HotkeysConfig::default(),
    };

    if let Some(chord) = &options.chord {
        let args = parse_chord(chord).with_context(|| format!("Invalid --chord {:?}", chord))?;
        config.upsert(HotkeyBinding::new(options.chord_name.clone(), args));
    }

    Ok(config.hotkeys)
}

impl ApplicationHandler for HotkeysApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(format!("par-hotkeys ({} hotkeys)", self.registry.len()))
            .with_inner_size(LogicalSize::new(480.0, 120.0));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                log::info!("Listening for {:?}", self.registry.names());
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed; detaching hotkeys");
                self.registry.clear();
                self.window = None;
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
            }
            WindowEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => {
                if event.state == ElementState::Pressed && !is_synthetic {
                    self.handle_key_press(&event);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(watcher) = &self.watcher else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        let mut changed = false;
        while let Some(event) = watcher.try_recv() {
            log::debug!("Hotkeys file event: {:?}", event.path);
            changed = true;
        }
        if changed {
            self.reload_hotkeys();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(
            Instant::now() + WATCH_POLL_INTERVAL,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options(chord: Option<&str>) -> RuntimeOptions {
        RuntimeOptions {
            chord: chord.map(str::to_string),
            ..RuntimeOptions::default()
        }
    }

    #[test]
    fn test_load_bindings_chord_only() {
        let bindings = load_bindings(None, &options(Some("Ctrl+K"))).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].name, "chord");
        assert_eq!(bindings[0].args.supplied_key(), Some("K"));
    }

    #[test]
    fn test_load_bindings_chord_overrides_file_entry() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hotkeys.yaml");
        fs::write(
            &path,
            "hotkeys:\n  - name: chord\n    key: a\n  - name: save\n    key: s\n",
        )
        .unwrap();

        let bindings = load_bindings(Some(&path), &options(Some("Alt+B"))).unwrap();
        let names: Vec<&str> = bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["chord", "save"]);
        assert_eq!(bindings[0].args.supplied_key(), Some("B"));
    }

    #[test]
    fn test_load_bindings_errors() {
        assert!(load_bindings(None, &options(Some("Ctrl+"))).is_err());

        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml");
        assert!(load_bindings(Some(&missing), &options(None)).is_err());
    }

    #[test]
    fn test_resolve_explicit_path() {
        let opts = RuntimeOptions {
            config_path: Some(PathBuf::from("custom.yaml")),
            ..RuntimeOptions::default()
        };
        assert_eq!(resolve_hotkeys_path(&opts), Some(PathBuf::from("custom.yaml")));
    }
}
