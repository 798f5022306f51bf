//! Winks overlay host.
//!
//! Runs the input controller and bridges it to the overlay UI over stdio:
//! commands arrive as JSON lines on stdin, events leave as JSON lines on
//! stdout, logs go to stderr.

mod logging;
mod transport;

use anyhow::Result;
use crossbeam_channel::{unbounded, Sender};
use std::io::{self, BufWriter};
use std::thread;
use tracing::{info, warn};
use winks_core::{
    load_config, Backends, Controller, EventSurfaceHost, InputSimulator, NoopSimulator,
    OverlayEvent, Rect, SettingsStore, WinksConfig,
};
use winks_platform::{
    get_primary_scale_factor, overlay_window, set_dpi_aware, EnigoSimulator,
    VirtualKeyboardLauncher,
};

/// Work area assumed when no input backend is available.
const FALLBACK_WORK_AREA: Rect = Rect::new(0, 0, 1920, 1080);

fn build_backends(config: &WinksConfig, events: &Sender<OverlayEvent>) -> Backends {
    let simulator: Box<dyn InputSimulator> = match EnigoSimulator::new() {
        Ok(simulator) => Box::new(simulator),
        Err(e) => {
            warn!(error = %e, "Input simulation unavailable, using no-op simulator");
            Box::new(NoopSimulator::new(FALLBACK_WORK_AREA))
        }
    };

    Backends {
        simulator,
        overlay: overlay_window(&config.overlay),
        surface_host: Box::new(EventSurfaceHost::new(events.clone())),
        platform: Box::new(VirtualKeyboardLauncher::new(&config.keyboard)),
    }
}

fn main() -> Result<()> {
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (WinksConfig::default(), Some(e)),
    };

    logging::setup(config.log_to_file);
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    // Cursor reads and window rects must both be in physical pixels.
    set_dpi_aware();
    info!(
        scale_factor = get_primary_scale_factor(),
        version = env!("CARGO_PKG_VERSION"),
        "Winks starting"
    );

    let settings = SettingsStore::in_app_data_dir();
    let handle = Controller::spawn(config.clone(), Some(settings), |events| {
        build_backends(&config, events)
    });

    let (error_tx, error_rx) = unbounded();
    let commands = handle.commands();
    thread::spawn(move || {
        transport::read_commands(io::stdin().lock(), &commands, &error_tx);
    });

    let stdout = BufWriter::new(io::stdout().lock());
    let result = transport::pump_events(stdout, handle.events(), error_rx);

    handle.shutdown();
    info!("Winks stopped");
    result
}
