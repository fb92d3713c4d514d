use anyhow::Result;
use par_hotkeys::app::HotkeysApp;
use par_hotkeys::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // Route log::info!() etc. to the debug log file; stdout is reserved for
    // the JSON-lines bridge.
    par_hotkeys::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting par-hotkeys v{}", par_hotkeys::VERSION);

    let result = HotkeysApp::new(runtime_options).and_then(HotkeysApp::run);

    log::info!("Event loop exited");

    match result {
        Ok(()) => Ok(()),
        Err(ref e) => {
            eprintln!("par-hotkeys: error: {e:#}");
            #[cfg(target_os = "linux")]
            {
                let msg = format!("{e:?}").to_lowercase();
                if msg.contains("display") || msg.contains("wayland") || msg.contains("x server") {
                    eprintln!(
                        "par-hotkeys: hint: no display server found; ensure DISPLAY (X11) or \
                         WAYLAND_DISPLAY (Wayland) is set"
                    );
                }
            }
            result
        }
    }
}
