//! Messages exchanged with the overlay UI.
//!
//! Both directions are tagged by `type` so they travel as one JSON object per
//! line, e.g. `{"type":"scroll","direction":"up"}`.

use crate::{CalibrationSettings, CaptureIntent, Corner, Rect, ScreenPoint, ScrollDirection};
use serde::{Deserialize, Serialize};

/// Commands accepted by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OverlayCommand {
    /// Scroll at the remembered anchor.
    Scroll { direction: ScrollDirection },
    /// Open the capture surface for a new scroll anchor.
    CaptureScrollAnchor,
    /// Open the capture surface for drag origin, then destination.
    CaptureDragPoints,
    /// Replay a drag between the captured points.
    ExecuteDrag,
    /// Abort a drag in progress and release the button.
    CancelDrag,
    /// Open the capture surface for an overlay placement hint.
    CaptureOverlayAnchor,
    /// Move the overlay to the corner nearest its anchor.
    RelocateOverlay,
    OpenVirtualKeyboard,
    /// The capture surface was clicked.
    SurfaceClicked,
    /// The capture surface was closed without a click.
    SurfaceClosed,
    /// Overlay bounds as seen by the UI shell; `None` once the overlay is gone.
    OverlayBounds { bounds: Option<Rect> },
    StartProximity,
    StopProximity,
    GetCalibration,
    /// Merge `patch` into the stored calibration settings.
    UpdateCalibration { patch: serde_json::Value },
    Shutdown,
}

/// Events pushed to the overlay UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OverlayEvent {
    ProximityUpdate {
        #[serde(rename = "isNear")]
        is_near: bool,
    },
    /// The capture surface has closed, with or without a point.
    CaptureComplete,
    SurfaceOpened { intent: CaptureIntent },
    SurfaceFocused,
    SurfaceIntentChanged { intent: CaptureIntent },
    SurfaceClosed,
    AnchorCaptured { intent: CaptureIntent, point: ScreenPoint },
    OverlayMoved { corner: Corner, position: ScreenPoint },
    DragStarted,
    DragFinished { cancelled: bool },
    Calibration { settings: CalibrationSettings },
    Error { message: String },
}
