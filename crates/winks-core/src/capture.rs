//! Coordinate capture surface.
//!
//! A transparent full-screen window that records where the user clicks.
//! The window itself belongs to whatever hosts the UI; this module tracks
//! whether it is open and what the next click means.

use crate::{CaptureIntent, InputError, InputResult, OverlayEvent, ScreenPoint};
use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

/// Creates and tears down the actual capture window.
pub trait SurfaceHost: Send {
    /// Create a full-screen, always-on-top capture window on the primary display.
    fn create(&mut self, intent: CaptureIntent) -> InputResult<()>;

    /// Bring the existing capture window to the front.
    fn focus(&mut self);

    /// The pending intent changed while the window stayed open.
    fn retarget(&mut self, intent: CaptureIntent);

    fn destroy(&mut self);
}

/// What `CaptureSurface::open` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Created,
    /// A surface was already open; it was focused instead.
    Focused,
    Failed,
}

/// A click recorded by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedPoint {
    pub intent: CaptureIntent,
    pub point: ScreenPoint,
    /// Whether the surface closed after this click.
    pub closed: bool,
}

/// Tracks the single capture surface and its pending intent.
pub struct CaptureSurface {
    host: Box<dyn SurfaceHost>,
    pending: Option<CaptureIntent>,
}

impl CaptureSurface {
    pub fn new(host: Box<dyn SurfaceHost>) -> Self {
        Self {
            host,
            pending: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_intent(&self) -> Option<CaptureIntent> {
        self.pending
    }

    /// Open the surface for `intent`, or focus it if one is already open.
    ///
    /// An open surface keeps its current intent.
    pub fn open(&mut self, intent: CaptureIntent) -> OpenOutcome {
        if let Some(current) = self.pending {
            debug!(?current, requested = ?intent, "Capture surface already open, focusing");
            self.host.focus();
            return OpenOutcome::Focused;
        }

        match self.host.create(intent) {
            Ok(()) => {
                info!(?intent, "Capture surface opened");
                self.pending = Some(intent);
                OpenOutcome::Created
            }
            Err(e) => {
                warn!(?intent, error = %e, "Failed to open capture surface");
                OpenOutcome::Failed
            }
        }
    }

    /// Record a click at `point` (the OS cursor position).
    ///
    /// A drag origin keeps the surface open for the destination click;
    /// every other intent closes it.
    pub fn record_click(&mut self, point: ScreenPoint) -> Option<CapturedPoint> {
        let Some(intent) = self.pending else {
            debug!(?point, "Click without an open capture surface, ignoring");
            return None;
        };

        let closed = if intent == CaptureIntent::DragOrigin {
            self.pending = Some(CaptureIntent::DragDestination);
            self.host.retarget(CaptureIntent::DragDestination);
            false
        } else {
            self.close();
            true
        };

        Some(CapturedPoint {
            intent,
            point,
            closed,
        })
    }

    /// Destroy the surface if present. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        if self.pending.take().is_some() {
            self.host.destroy();
            debug!("Capture surface closed");
            true
        } else {
            false
        }
    }

    /// The window went away on its own (e.g. Escape). No point is produced.
    pub fn closed_externally(&mut self) -> bool {
        match self.pending.take() {
            Some(intent) => {
                info!(?intent, "Capture surface closed before a click");
                true
            }
            None => false,
        }
    }
}

/// Host that asks the UI shell to manage the window through overlay events.
pub struct EventSurfaceHost {
    events: Sender<OverlayEvent>,
}

impl EventSurfaceHost {
    pub fn new(events: Sender<OverlayEvent>) -> Self {
        Self { events }
    }

    fn emit(&self, event: OverlayEvent) -> InputResult<()> {
        self.events.try_send(event).map_err(|e| {
            warn!("Failed to emit surface event: {}", e);
            InputError::Os(format!("surface event not delivered: {e}"))
        })
    }
}

impl SurfaceHost for EventSurfaceHost {
    /// Fails when the UI cannot be told, so no surface is recorded as open.
    fn create(&mut self, intent: CaptureIntent) -> InputResult<()> {
        self.emit(OverlayEvent::SurfaceOpened { intent })
    }

    fn focus(&mut self) {
        let _ = self.emit(OverlayEvent::SurfaceFocused);
    }

    fn retarget(&mut self, intent: CaptureIntent) {
        let _ = self.emit(OverlayEvent::SurfaceIntentChanged { intent });
    }

    fn destroy(&mut self) {
        let _ = self.emit(OverlayEvent::SurfaceClosed);
    }
}
