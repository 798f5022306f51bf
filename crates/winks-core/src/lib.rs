//! winks-core: overlay anchors, capture surface and input orchestration.
//!
//! Design goal: keep this crate UI-agnostic and platform-agnostic.
//! OS access (pointer injection, window lookup, keyboard launch) lives in
//! `winks-platform` behind the traits declared here.

mod capture;
mod config;
mod controller;
mod error;
mod geometry;
mod orchestrator;
mod overlay;
mod protocol;
mod proximity;
mod settings;
mod simulator;

#[cfg(test)]
pub(crate) mod testing;

pub use capture::{CaptureSurface, CapturedPoint, EventSurfaceHost, OpenOutcome, SurfaceHost};
pub use config::{
    config_file_path, get_app_data_dir, load_config, load_config_from, save_config_to,
    ConfigError, DragConfig, KeyboardConfig, OverlayConfig, ProximityConfig, ScrollConfig,
    ScrollStrength, WinksConfig,
};
pub use controller::{Controller, ControllerHandle};
pub use error::{InputError, InputResult};
pub use geometry::{nearest_corner, Corner, Rect, ScreenPoint};
pub use orchestrator::{Backends, Orchestrator, OrchestratorState, PlatformServices};
pub use overlay::{OverlayWindow, ReportedOverlayWindow};
pub use protocol::{OverlayCommand, OverlayEvent};
pub use proximity::ProximityWatcher;
pub use settings::{CalibrationSettings, SettingsError, SettingsStore};
pub use simulator::{InputSimulator, NoopSimulator, SmoothMove};

use serde::{Deserialize, Serialize};

/// Why the capture surface was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptureIntent {
    ScrollAnchor,
    DragOrigin,
    DragDestination,
    OverlayAnchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Horizontal scrolls are a vertical wheel event with Shift held.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Wheel ticks for one command: up/left away from the user, down/right toward.
    pub fn ticks(self) -> i32 {
        match self {
            Self::Up | Self::Left => 1,
            Self::Down | Self::Right => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    Shift,
}
