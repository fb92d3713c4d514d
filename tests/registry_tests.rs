//! HotkeyRegistry tests: named bindings on a shared dispatcher.

mod common;

use common::{RecordingEmbedder, Signal};
use par_hotkeys::{
    ChordArgs, Embedder, HotkeyBinding, HotkeyRegistry, HotkeysConfig, JsonLinesEmbedder,
    KeyDispatcher, KeyboardEvent, Pulse,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

fn binding(name: &str, key: &str) -> HotkeyBinding {
    HotkeyBinding::new(name, ChordArgs::new().with_key(key))
}

/// Registry whose embedders are recorders, kept by hotkey name
fn recording_registry() -> (
    Arc<KeyDispatcher>,
    HotkeyRegistry,
    Arc<Mutex<HashMap<String, Arc<RecordingEmbedder>>>>,
) {
    let dispatcher = Arc::new(KeyDispatcher::new());
    let recorders: Arc<Mutex<HashMap<String, Arc<RecordingEmbedder>>>> =
        Arc::new(Mutex::new(HashMap::new()));
    let factory_recorders = Arc::clone(&recorders);
    let registry = HotkeyRegistry::new(
        Arc::clone(&dispatcher),
        Box::new(move |name: &str| -> Arc<dyn Embedder> {
            let recorder = RecordingEmbedder::new();
            factory_recorders
                .lock()
                .insert(name.to_string(), Arc::clone(&recorder));
            recorder
        }),
    );
    (dispatcher, registry, recorders)
}

#[test]
fn test_activate_attaches_then_reloads() {
    let (dispatcher, mut registry, recorders) = recording_registry();
    registry.activate(&[binding("palette", "k")]);

    assert_eq!(dispatcher.listener_count(), 1);
    let recorder = Arc::clone(&recorders.lock()["palette"]);
    assert_eq!(
        recorder.signals(),
        vec![Signal::Ready, Signal::Value(None), Signal::Value(None)]
    );
}

#[test]
fn test_pressed_consumes_pulse() {
    let (dispatcher, mut registry, _recorders) = recording_registry();
    registry.activate(&[binding("save", "s"), binding("open", "o")]);

    dispatcher.dispatch(&KeyboardEvent::key("s"));

    assert!(registry.pressed("save"));
    assert!(!registry.pressed("save"));
    assert!(!registry.pressed("open"));
}

#[test]
fn test_pressed_polling_writes_no_bridge_lines() {
    let out = Arc::new(Mutex::new(Vec::<u8>::new()));
    let writer = Arc::clone(&out);
    let dispatcher = Arc::new(KeyDispatcher::new());
    let mut registry = HotkeyRegistry::new(
        Arc::clone(&dispatcher),
        Box::new(move |name: &str| -> Arc<dyn Embedder> {
            Arc::new(JsonLinesEmbedder::new(name, Arc::clone(&writer)))
        }),
    );
    registry.activate(&[binding("go", "g")]);
    out.lock().clear();

    for _ in 0..10 {
        assert!(!registry.pressed("go"));
    }
    assert!(out.lock().is_empty());
}

#[test]
fn test_drain_pressed_in_binding_order() {
    let (dispatcher, mut registry, _recorders) = recording_registry();
    registry.activate(&[binding("a", "a"), binding("b", "b"), binding("c", "c")]);

    dispatcher.dispatch(&KeyboardEvent::key("c"));
    dispatcher.dispatch(&KeyboardEvent::key("a"));

    assert_eq!(registry.drain_pressed(), vec!["a", "c"]);
    assert!(registry.drain_pressed().is_empty());
}

#[test]
fn test_drain_pressed_only_clears_fired() {
    let (dispatcher, mut registry, recorders) = recording_registry();
    registry.activate(&[binding("a", "a"), binding("b", "b")]);
    for recorder in recorders.lock().values() {
        recorder.take();
    }

    dispatcher.dispatch(&KeyboardEvent::key("a"));
    registry.drain_pressed();

    let recorders = recorders.lock();
    assert_eq!(
        recorders["a"].signals(),
        vec![Signal::Value(Some(true)), Signal::Value(None)]
    );
    assert!(recorders["b"].signals().is_empty());
}

#[test]
fn test_reactivate_reuses_listener() {
    let (dispatcher, mut registry, recorders) = recording_registry();
    registry.activate(&[binding("palette", "k")]);
    dispatcher.dispatch(&KeyboardEvent::key("k"));
    let recorder = Arc::clone(&recorders.lock()["palette"]);
    recorder.take();

    registry.activate(&[binding("palette", "p")]);

    // Reload, not re-attach: no second ready signal, pulse cleared
    assert_eq!(recorder.signals(), vec![Signal::Value(None)]);
    assert_eq!(dispatcher.listener_count(), 1);
    assert_eq!(registry.get("palette").map(|l| l.pulse()), Some(Pulse::Idle));

    dispatcher.dispatch(&KeyboardEvent::key("k"));
    assert!(!registry.pressed("palette"));
    dispatcher.dispatch(&KeyboardEvent::key("p"));
    assert!(registry.pressed("palette"));
}

#[test]
fn test_reactivate_detaches_removed_names() {
    let (dispatcher, mut registry, _recorders) = recording_registry();
    registry.activate(&[binding("a", "a"), binding("b", "b")]);

    registry.activate(&[binding("b", "b")]);

    assert_eq!(registry.names(), vec!["b"]);
    assert_eq!(dispatcher.listener_count(), 1);
    dispatcher.dispatch(&KeyboardEvent::key("a"));
    assert!(!registry.pressed("a"));
}

#[test]
fn test_activate_from_hotkeys_file() {
    let config = HotkeysConfig::from_yaml(
        r#"
hotkeys:
  - name: palette
    key: k
    ctrl: true
    shift: any
  - name: save
    targetKey: s
    meta: true
    preventDefault: true
"#,
    )
    .unwrap();

    let dispatcher = Arc::new(KeyDispatcher::new());
    let mut registry = HotkeyRegistry::silent(Arc::clone(&dispatcher));
    registry.activate(&config.hotkeys);

    dispatcher.dispatch(&KeyboardEvent::key("K").with_ctrl(true).with_shift(true));
    assert!(dispatcher.dispatch(&KeyboardEvent::key("s").with_meta(true)));

    assert_eq!(registry.drain_pressed(), vec!["palette", "save"]);
}

#[test]
fn test_json_lines_bridge_end_to_end() {
    let out = Arc::new(Mutex::new(Vec::<u8>::new()));
    let writer = Arc::clone(&out);
    let dispatcher = Arc::new(KeyDispatcher::new());
    let mut registry = HotkeyRegistry::new(
        Arc::clone(&dispatcher),
        Box::new(move |name: &str| -> Arc<dyn Embedder> {
            Arc::new(JsonLinesEmbedder::new(name, Arc::clone(&writer)))
        }),
    );

    registry.activate(&[binding("go", "g")]);
    dispatcher.dispatch(&KeyboardEvent::key("g"));
    assert!(registry.pressed("go"));

    let text = String::from_utf8(out.lock().clone()).unwrap();
    let messages: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let types: Vec<&str> = messages
        .iter()
        .map(|m| m["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["ready", "value", "value", "value", "value"]);
    assert!(messages.iter().all(|m| m["hotkey"] == "go"));
    assert_eq!(messages[3]["value"], serde_json::Value::Bool(true));
    assert_eq!(messages[4]["value"], serde_json::Value::Null);
}
