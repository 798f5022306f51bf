//! Scroll/drag orchestration around remembered anchor points.
//!
//! The orchestrator owns all anchor state and sequences simulator calls so a
//! scroll or drag lands at an anchor rather than at the live cursor. Every
//! OS failure is logged and swallowed here; nothing escapes to the caller.

use crate::{
    nearest_corner, CaptureIntent, CaptureSurface, Corner, InputResult, InputSimulator, Modifier,
    MouseButton, OpenOutcome, OverlayEvent, OverlayWindow, ProximityWatcher, Rect, ScreenPoint,
    ScrollDirection, SmoothMove, SurfaceHost, WinksConfig,
};
use crossbeam_channel::{never, tick, Receiver, Sender};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Platform capabilities the orchestrator delegates to.
pub trait PlatformServices: Send {
    /// Launch the OS on-screen keyboard. Best effort.
    fn open_virtual_keyboard(&self) -> InputResult<()>;
}

/// OS-facing collaborators handed to the orchestrator at startup.
pub struct Backends {
    pub simulator: Box<dyn InputSimulator>,
    pub overlay: Box<dyn OverlayWindow>,
    pub surface_host: Box<dyn SurfaceHost>,
    pub platform: Box<dyn PlatformServices>,
}

/// Remembered anchors. Unset until captured, then only ever overwritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestratorState {
    pub scroll_anchor: Option<ScreenPoint>,
    pub drag_origin: Option<ScreenPoint>,
    pub drag_destination: Option<ScreenPoint>,
    pub overlay_anchor: Option<ScreenPoint>,
}

impl OrchestratorState {
    pub fn anchor(&self, intent: CaptureIntent) -> Option<ScreenPoint> {
        match intent {
            CaptureIntent::ScrollAnchor => self.scroll_anchor,
            CaptureIntent::DragOrigin => self.drag_origin,
            CaptureIntent::DragDestination => self.drag_destination,
            CaptureIntent::OverlayAnchor => self.overlay_anchor,
        }
    }

    fn set(&mut self, intent: CaptureIntent, point: ScreenPoint) {
        let slot = match intent {
            CaptureIntent::ScrollAnchor => &mut self.scroll_anchor,
            CaptureIntent::DragOrigin => &mut self.drag_origin,
            CaptureIntent::DragDestination => &mut self.drag_destination,
            CaptureIntent::OverlayAnchor => &mut self.overlay_anchor,
        };
        *slot = Some(point);
    }
}

enum DragPhase {
    /// Waiting for the scheduled start.
    Pending { start_at: Instant },
    /// Button is down and the pointer is travelling.
    Moving(SmoothMove),
}

struct DragGesture {
    origin: ScreenPoint,
    destination: ScreenPoint,
    phase: DragPhase,
    frames: Receiver<Instant>,
}

pub struct Orchestrator {
    config: WinksConfig,
    state: OrchestratorState,
    simulator: Box<dyn InputSimulator>,
    overlay: Box<dyn OverlayWindow>,
    platform: Box<dyn PlatformServices>,
    surface: CaptureSurface,
    proximity: ProximityWatcher,
    /// Cleared only by an explicit stop; an auto-stop keeps it set.
    proximity_wanted: bool,
    drag: Option<DragGesture>,
    events: Sender<OverlayEvent>,
}

impl Orchestrator {
    pub fn new(config: WinksConfig, backends: Backends, events: Sender<OverlayEvent>) -> Self {
        let proximity = ProximityWatcher::new(&config.proximity);
        Self {
            config,
            state: OrchestratorState::default(),
            simulator: backends.simulator,
            overlay: backends.overlay,
            platform: backends.platform,
            surface: CaptureSurface::new(backends.surface_host),
            proximity,
            proximity_wanted: false,
            drag: None,
            events,
        }
    }

    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    pub fn config(&self) -> &WinksConfig {
        &self.config
    }

    pub fn capture_surface(&self) -> &CaptureSurface {
        &self.surface
    }

    // === Scrolling ===

    /// Scroll at the scroll anchor (or work-area centre), then put the cursor back.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        if self.drag.is_some() {
            debug!(?direction, "scroll ignored while a drag is running");
            return;
        }

        let repeats = self.config.scroll.strength.for_direction(direction);
        if repeats == 0 {
            debug!(?direction, "scroll strength is zero, nothing to do");
            return;
        }

        let original = match self.simulator.cursor_position() {
            Ok(point) => Some(point),
            Err(e) => {
                warn!(error = %e, "failed to read cursor, scroll will not restore it");
                None
            }
        };

        let target = self.state.scroll_anchor.or_else(|| self.screen_center());
        if let Some(target) = target {
            self.attempt("move cursor to scroll anchor", self.simulator.move_cursor(target));
        }

        let delta = direction.ticks() * self.config.scroll.wheel_delta_per_tick;
        let horizontal = direction.is_horizontal();
        debug!(?direction, delta, repeats, ?target, "scrolling");

        if horizontal {
            self.attempt("press shift", self.simulator.set_modifier(Modifier::Shift, true));
        }
        for _ in 0..repeats {
            self.attempt("scroll wheel", self.simulator.scroll_wheel(delta));
        }
        if horizontal {
            self.attempt("release shift", self.simulator.set_modifier(Modifier::Shift, false));
        }

        if let Some(original) = original {
            self.attempt("restore cursor", self.simulator.move_cursor(original));
        }
    }

    fn screen_center(&self) -> Option<ScreenPoint> {
        match self.simulator.primary_work_area() {
            Ok(area) => Some(area.center()),
            Err(e) => {
                warn!(error = %e, "failed to read work area");
                None
            }
        }
    }

    // === Capture ===

    /// Open the capture surface for `intent` (focuses it if already open).
    pub fn request_capture(&mut self, intent: CaptureIntent) -> OpenOutcome {
        self.surface.open(intent)
    }

    pub fn request_new_scroll_anchor(&mut self) -> OpenOutcome {
        self.request_capture(CaptureIntent::ScrollAnchor)
    }

    pub fn request_drag(&mut self) -> OpenOutcome {
        self.request_capture(CaptureIntent::DragOrigin)
    }

    pub fn request_overlay_move(&mut self) -> OpenOutcome {
        self.request_capture(CaptureIntent::OverlayAnchor)
    }

    /// The capture surface was clicked: record the live OS cursor position.
    pub fn surface_clicked(&mut self, now: Instant) {
        if !self.surface.is_open() {
            debug!("surface click with no capture pending");
            return;
        }

        let point = match self.simulator.cursor_position() {
            Ok(point) => point,
            Err(e) => {
                warn!(error = %e, "failed to read cursor for capture, click dropped");
                return;
            }
        };

        let Some(captured) = self.surface.record_click(point) else {
            return;
        };
        if captured.closed {
            self.emit(OverlayEvent::CaptureComplete);
        }
        self.point_captured(captured.intent, captured.point, now);
    }

    /// The capture surface closed without a click. Anchors are left as they were.
    pub fn surface_closed(&mut self) {
        if self.surface.closed_externally() {
            self.emit(OverlayEvent::CaptureComplete);
        }
    }

    /// Store a captured point and run whatever the intent chains into.
    pub fn point_captured(&mut self, intent: CaptureIntent, point: ScreenPoint, now: Instant) {
        info!(?intent, ?point, "anchor captured");
        self.state.set(intent, point);
        self.emit(OverlayEvent::AnchorCaptured { intent, point });

        match intent {
            CaptureIntent::OverlayAnchor if self.config.overlay.relocate_on_capture => {
                self.relocate_overlay();
            }
            CaptureIntent::DragDestination if self.config.drag.auto_execute => {
                self.begin_drag(now + self.config.drag.auto_execute_delay());
            }
            _ => {}
        }
    }

    // === Dragging ===

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag between the two drag anchors. Anchors are kept for repeats.
    pub fn execute_drag(&mut self, now: Instant) -> bool {
        if !self.begin_drag(now) {
            return false;
        }
        self.advance_drag(now);
        true
    }

    fn begin_drag(&mut self, start_at: Instant) -> bool {
        let (Some(origin), Some(destination)) = (self.state.drag_origin, self.state.drag_destination)
        else {
            debug!(state = ?self.state, "drag needs both origin and destination, skipping");
            return false;
        };

        if self.drag.is_some() {
            debug!("drag already in progress, ignoring");
            return false;
        }

        self.drag = Some(DragGesture {
            origin,
            destination,
            phase: DragPhase::Pending { start_at },
            frames: tick(self.config.drag.frame_interval()),
        });
        true
    }

    /// Frame source for `select!`; never fires when no drag is active.
    pub fn drag_frames(&self) -> Receiver<Instant> {
        self.drag
            .as_ref()
            .map(|drag| drag.frames.clone())
            .unwrap_or_else(never)
    }

    /// Step the active drag to `now`.
    pub fn advance_drag(&mut self, now: Instant) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        match drag.phase {
            DragPhase::Pending { start_at } => {
                if now < start_at {
                    return;
                }
                let (origin, destination) = (drag.origin, drag.destination);
                drag.phase = DragPhase::Moving(SmoothMove::new(
                    origin,
                    destination,
                    now,
                    self.config.drag.duration(),
                ));

                info!(?origin, ?destination, "drag started");
                self.attempt("move cursor to drag origin", self.simulator.move_cursor(origin));
                self.attempt(
                    "press left button",
                    self.simulator.toggle_mouse_button(MouseButton::Left, true),
                );
                self.emit(OverlayEvent::DragStarted);
            }
            DragPhase::Moving(motion) => {
                if motion.is_finished(now) {
                    self.finish_drag(motion.destination());
                } else {
                    let point = motion.position_at(now);
                    self.attempt("move cursor during drag", self.simulator.move_cursor(point));
                }
            }
        }
    }

    /// Abort the active drag, releasing the button where the pointer is.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        match drag.phase {
            DragPhase::Pending { .. } => {
                debug!("pending drag cancelled before it started");
            }
            DragPhase::Moving(_) => {
                self.attempt(
                    "release left button",
                    self.simulator.toggle_mouse_button(MouseButton::Left, false),
                );
                info!("drag cancelled");
            }
        }
        self.emit(OverlayEvent::DragFinished { cancelled: true });
        true
    }

    fn finish_drag(&mut self, destination: ScreenPoint) {
        self.drag = None;
        self.attempt(
            "move cursor to drag destination",
            self.simulator.move_cursor(destination),
        );
        self.attempt(
            "release left button",
            self.simulator.toggle_mouse_button(MouseButton::Left, false),
        );
        info!(?destination, "drag finished");
        self.emit(OverlayEvent::DragFinished { cancelled: false });
    }

    // === Overlay ===

    /// Move the overlay into the work-area corner nearest the overlay anchor.
    pub fn relocate_overlay(&mut self) -> Option<Corner> {
        let Some(anchor) = self.state.overlay_anchor else {
            debug!("no overlay anchor captured, relocate skipped");
            return None;
        };

        let area: Rect = match self.simulator.primary_work_area() {
            Ok(area) => area,
            Err(e) => {
                warn!(error = %e, "failed to read work area, relocate skipped");
                return None;
            }
        };

        let Some(bounds) = self.overlay.bounds() else {
            warn!("overlay window is gone, relocate skipped");
            return None;
        };

        let corner = nearest_corner(anchor, area);
        let position = corner.window_origin(area, bounds.width, bounds.height);

        match self.overlay.set_position(position) {
            Ok(()) => {
                info!(?corner, ?position, "overlay moved");
                self.emit(OverlayEvent::OverlayMoved { corner, position });
            }
            Err(e) => warn!(?corner, error = %e, "failed to move overlay"),
        }
        Some(corner)
    }

    pub fn overlay_bounds_reported(&mut self, bounds: Option<Rect>) {
        self.overlay.report_bounds(bounds);
        if bounds.is_some() && self.proximity_wanted && !self.proximity.is_running() {
            self.proximity.start();
        }
    }

    pub fn open_virtual_keyboard(&mut self) {
        if let Err(e) = self.platform.open_virtual_keyboard() {
            warn!(error = %e, "on-screen keyboard unavailable");
        }
    }

    // === Proximity ===

    pub fn start_proximity(&mut self) {
        self.proximity_wanted = true;
        self.proximity.start();
    }

    pub fn stop_proximity(&mut self) {
        self.proximity_wanted = false;
        self.proximity.stop();
    }

    pub fn is_proximity_running(&self) -> bool {
        self.proximity.is_running()
    }

    /// Tick source for `select!`; never fires while the watcher is stopped.
    pub fn proximity_ticks(&self) -> Receiver<Instant> {
        self.proximity.ticks()
    }

    /// One proximity poll: compare cursor with the overlay and publish the result.
    pub fn proximity_tick(&mut self) {
        let cursor = match self.simulator.cursor_position() {
            Ok(point) => point,
            Err(e) => {
                warn!(error = %e, "failed to read cursor for proximity");
                return;
            }
        };

        if let Some(is_near) = self.proximity.poll(cursor, self.overlay.bounds()) {
            self.emit(OverlayEvent::ProximityUpdate { is_near });
        }
    }

    /// Release anything held before the controller exits.
    pub fn shutdown(&mut self) {
        self.cancel_drag();
        if self.surface.close() {
            self.emit(OverlayEvent::CaptureComplete);
        }
        self.proximity.stop();
    }

    fn attempt(&self, what: &str, result: InputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "{} failed", what);
        }
    }

    pub(crate) fn emit(&self, event: OverlayEvent) {
        if let Err(e) = self.events.try_send(event) {
            warn!("Failed to emit event: {}", e);
        }
    }
}
