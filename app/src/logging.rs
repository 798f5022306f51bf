//! Logging setup: stderr always, plus a daily rolling file when enabled.
//!
//! stdout carries the event stream, so nothing here may write to it.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use winks_core::get_app_data_dir;

const DEFAULT_FILTER: &str = "Winks=info,winks_core=info,winks_platform=info";

pub fn log_dir() -> PathBuf {
    get_app_data_dir().join("logs")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging. `RUST_LOG` overrides the default filter.
///
/// Returns false (after a warning on stderr) if a subscriber was already set.
pub fn setup(log_to_file: bool) -> bool {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    let file_layer = if log_to_file {
        let dir = log_dir();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("Warning: Failed to create log directory {:?}: {}", dir, e);
            None
        } else {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, "winks.log");
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .with_filter(env_filter()),
            )
        }
    } else {
        None
    };

    let file_enabled = file_layer.is_some();
    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: Failed to initialize logging: {}", e);
        return false;
    }

    if file_enabled {
        tracing::info!("File logging enabled: {:?}", log_dir());
    }
    true
}
