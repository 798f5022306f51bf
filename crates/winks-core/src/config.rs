//! Runtime configuration loaded from `config.yaml`.
//!
//! Every field has a documented default so a missing or partial file still
//! yields a usable configuration.

use crate::ScrollDirection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "WINKS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinksConfig {
    pub proximity: ProximityConfig,
    pub scroll: ScrollConfig,
    pub drag: DragConfig,
    pub overlay: OverlayConfig,
    pub keyboard: KeyboardConfig,
    /// Also write logs to a daily rolling file under the app data dir.
    pub log_to_file: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Start the watcher when the controller starts.
    pub enabled: bool,
    /// Poll cadence in milliseconds.
    pub interval_ms: u64,
    /// Pixels added around the overlay bounds on every side.
    pub buffer_px: i32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 100,
            buffer_px: 150,
        }
    }
}

impl ProximityConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Raw wheel delta per logical tick: three OS notches of 120.
    pub wheel_delta_per_tick: i32,
    pub strength: ScrollStrength,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            wheel_delta_per_tick: 360,
            strength: ScrollStrength::default(),
        }
    }
}

/// Wheel injections per command, per direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollStrength {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for ScrollStrength {
    fn default() -> Self {
        Self {
            up: 1,
            down: 1,
            left: 1,
            right: 1,
        }
    }
}

impl ScrollStrength {
    pub fn for_direction(&self, direction: ScrollDirection) -> u32 {
        match direction {
            ScrollDirection::Up => self.up,
            ScrollDirection::Down => self.down,
            ScrollDirection::Left => self.left,
            ScrollDirection::Right => self.right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Duration of the smooth move from origin to destination.
    pub duration_ms: u64,
    /// Pointer update cadence while a drag is animating.
    pub frame_interval_ms: u64,
    /// Run the drag as soon as the destination has been captured.
    pub auto_execute: bool,
    /// Delay between the destination click and the automatic drag.
    pub auto_execute_delay_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1800,
            frame_interval_ms: 10,
            auto_execute: true,
            auto_execute_delay_ms: 100,
        }
    }
}

impl DragConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn auto_execute_delay(&self) -> Duration {
        Duration::from_millis(self.auto_execute_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Title used to find the overlay window natively.
    pub window_title: String,
    /// Move the overlay as soon as its anchor has been captured.
    pub relocate_on_capture: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            window_title: "Winks Overlay".into(),
            relocate_on_capture: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Program and arguments replacing the platform's on-screen keyboard.
    pub command: Option<Vec<String>>,
}

/// Get the app data directory for winks.
pub fn get_app_data_dir() -> PathBuf {
    let base = dirs_next::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("winks")
}

/// Config file location, honouring `WINKS_CONFIG`.
pub fn config_file_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => get_app_data_dir().join("config.yaml"),
    }
}

/// Load the configuration from its default location.
///
/// A missing file yields defaults; an unreadable or malformed one is an error
/// so the caller can report it once logging is up.
pub fn load_config() -> Result<WinksConfig, ConfigError> {
    let path = config_file_path();
    if !path.exists() {
        debug!(?path, "No config file, using defaults");
        return Ok(WinksConfig::default());
    }

    let config = load_config_from(&path)?;
    info!(?path, "Loaded config");
    Ok(config)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<WinksConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&content)?;
    Ok(config)
}

pub fn save_config_to(path: impl AsRef<Path>, config: &WinksConfig) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(config)?)?;
    info!(?path, "Saved config");
    Ok(())
}
