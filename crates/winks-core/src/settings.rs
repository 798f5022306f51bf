//! Calibration settings storage and persistence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings patch must be a JSON object")]
    InvalidPatch,
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Head-tracking calibration forwarded to the vision process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalibrationSettings {
    pub left_wink_sensitivity: f64,
    pub right_wink_sensitivity: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub dead_zone: f64,
    pub tilt_angle: f64,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            left_wink_sensitivity: 0.5,
            right_wink_sensitivity: 0.5,
            yaw: 45.0,
            pitch: 45.0,
            dead_zone: 6.0,
            tilt_angle: 20.0,
        }
    }
}

/// JSON file holding [`CalibrationSettings`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<app data>/app-settings.json`.
    pub fn in_app_data_dir() -> Self {
        Self::new(crate::get_app_data_dir().join("app-settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved values layered over defaults; any read error yields defaults.
    pub fn load(&self) -> CalibrationSettings {
        if !self.path.exists() {
            return CalibrationSettings::default();
        }

        match self.read() {
            Ok(settings) => {
                debug!(path = ?self.path, "Loaded calibration settings");
                settings
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to read settings, using defaults");
                CalibrationSettings::default()
            }
        }
    }

    /// Merge the keys of `patch` into the current settings and write them back.
    pub fn update(&self, patch: &serde_json::Value) -> SettingsResult<CalibrationSettings> {
        let patch = patch.as_object().ok_or(SettingsError::InvalidPatch)?;

        let mut merged = serde_json::to_value(self.load())?;
        if let Some(current) = merged.as_object_mut() {
            for (key, value) in patch {
                current.insert(key.clone(), value.clone());
            }
        }
        let settings: CalibrationSettings = serde_json::from_value(merged)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&settings)?)?;

        info!(path = ?self.path, "Saved calibration settings");
        Ok(settings)
    }

    fn read(&self) -> SettingsResult<CalibrationSettings> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
