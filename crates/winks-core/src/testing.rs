//! Recording fakes for the OS-facing traits.

use crate::{
    Backends, CaptureIntent, InputError, InputResult, InputSimulator, Modifier, MouseButton,
    Orchestrator, OverlayEvent, OverlayWindow, PlatformServices, Rect, ScreenPoint, SurfaceHost,
    WinksConfig,
};
use crossbeam_channel::Receiver;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCall {
    Move(ScreenPoint),
    Wheel(i32),
    Modifier(Modifier, bool),
    Button(MouseButton, bool),
}

#[derive(Default)]
struct SimState {
    cursor: ScreenPoint,
    work_area: Rect,
    calls: Vec<SimCall>,
    fail_cursor_reads: bool,
}

/// Simulator that records every injected call and tracks a virtual cursor.
#[derive(Clone, Default)]
pub struct RecordingSimulator {
    state: Arc<Mutex<SimState>>,
}

impl RecordingSimulator {
    pub fn new(work_area: Rect) -> Self {
        let sim = Self::default();
        sim.state.lock().unwrap().work_area = work_area;
        sim
    }

    pub fn calls(&self) -> Vec<SimCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Place the cursor as if the user had moved it.
    pub fn set_cursor(&self, point: ScreenPoint) {
        self.state.lock().unwrap().cursor = point;
    }

    pub fn fail_cursor_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_cursor_reads = fail;
    }

    fn record(&self, call: SimCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl InputSimulator for RecordingSimulator {
    fn cursor_position(&self) -> InputResult<ScreenPoint> {
        let state = self.state.lock().unwrap();
        if state.fail_cursor_reads {
            return Err(InputError::Os("cursor read failed".into()));
        }
        Ok(state.cursor)
    }

    fn primary_work_area(&self) -> InputResult<Rect> {
        Ok(self.state.lock().unwrap().work_area)
    }

    fn move_cursor(&self, point: ScreenPoint) -> InputResult<()> {
        self.state.lock().unwrap().cursor = point;
        self.record(SimCall::Move(point));
        Ok(())
    }

    fn scroll_wheel(&self, delta: i32) -> InputResult<()> {
        self.record(SimCall::Wheel(delta));
        Ok(())
    }

    fn set_modifier(&self, key: Modifier, down: bool) -> InputResult<()> {
        self.record(SimCall::Modifier(key, down));
        Ok(())
    }

    fn toggle_mouse_button(&self, button: MouseButton, down: bool) -> InputResult<()> {
        self.record(SimCall::Button(button, down));
        Ok(())
    }
}

#[derive(Default)]
struct OverlayState {
    bounds: Option<Rect>,
    moves: Vec<ScreenPoint>,
}

/// Overlay window whose bounds the test controls.
#[derive(Clone, Default)]
pub struct FakeOverlay {
    state: Arc<Mutex<OverlayState>>,
}

impl FakeOverlay {
    pub fn set_bounds(&self, bounds: Option<Rect>) {
        self.state.lock().unwrap().bounds = bounds;
    }

    pub fn moves(&self) -> Vec<ScreenPoint> {
        self.state.lock().unwrap().moves.clone()
    }
}

impl OverlayWindow for FakeOverlay {
    fn bounds(&self) -> Option<Rect> {
        self.state.lock().unwrap().bounds
    }

    fn set_position(&mut self, origin: ScreenPoint) -> InputResult<()> {
        let mut state = self.state.lock().unwrap();
        let bounds = state.bounds.as_mut().ok_or(InputError::WindowGone)?;
        bounds.x = origin.x;
        bounds.y = origin.y;
        state.moves.push(origin);
        Ok(())
    }

    fn report_bounds(&mut self, bounds: Option<Rect>) {
        self.set_bounds(bounds);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Create(CaptureIntent),
    Focus,
    Retarget(CaptureIntent),
    Destroy,
}

#[derive(Clone, Default)]
pub struct FakeSurfaceHost {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl FakeSurfaceHost {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Windows created and not yet destroyed.
    pub fn open_windows(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        let created = calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Create(_)))
            .count();
        let destroyed = calls.iter().filter(|c| **c == SurfaceCall::Destroy).count();
        created - destroyed
    }
}

impl SurfaceHost for FakeSurfaceHost {
    fn create(&mut self, intent: CaptureIntent) -> InputResult<()> {
        self.calls.lock().unwrap().push(SurfaceCall::Create(intent));
        Ok(())
    }

    fn focus(&mut self) {
        self.calls.lock().unwrap().push(SurfaceCall::Focus);
    }

    fn retarget(&mut self, intent: CaptureIntent) {
        self.calls.lock().unwrap().push(SurfaceCall::Retarget(intent));
    }

    fn destroy(&mut self) {
        self.calls.lock().unwrap().push(SurfaceCall::Destroy);
    }
}

#[derive(Default)]
struct PlatformState {
    launches: usize,
    fail: bool,
}

#[derive(Clone, Default)]
pub struct FakePlatform {
    state: Arc<Mutex<PlatformState>>,
}

impl FakePlatform {
    pub fn fail(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    pub fn launches(&self) -> usize {
        self.state.lock().unwrap().launches
    }
}

impl PlatformServices for FakePlatform {
    fn open_virtual_keyboard(&self) -> InputResult<()> {
        let mut state = self.state.lock().unwrap();
        state.launches += 1;
        if state.fail {
            return Err(InputError::Unsupported("on-screen keyboard".into()));
        }
        Ok(())
    }
}

/// Handles to every fake plugged into a fresh orchestrator.
pub struct Fixture {
    pub orchestrator: Orchestrator,
    pub simulator: RecordingSimulator,
    pub overlay: FakeOverlay,
    pub surface: FakeSurfaceHost,
    pub platform: FakePlatform,
    pub event_rx: Receiver<OverlayEvent>,
}

impl Fixture {
    /// Drain events emitted so far.
    pub fn events(&self) -> Vec<OverlayEvent> {
        self.event_rx.try_iter().collect()
    }
}

pub fn fake_backends(
    work_area: Rect,
) -> (Backends, RecordingSimulator, FakeOverlay, FakeSurfaceHost, FakePlatform) {
    let simulator = RecordingSimulator::new(work_area);
    let overlay = FakeOverlay::default();
    let surface = FakeSurfaceHost::default();
    let platform = FakePlatform::default();

    let backends = Backends {
        simulator: Box::new(simulator.clone()),
        overlay: Box::new(overlay.clone()),
        surface_host: Box::new(surface.clone()),
        platform: Box::new(platform.clone()),
    };
    (backends, simulator, overlay, surface, platform)
}

pub fn fixture(config: WinksConfig, work_area: Rect) -> Fixture {
    let (backends, simulator, overlay, surface, platform) = fake_backends(work_area);
    let (event_tx, event_rx) = crossbeam_channel::unbounded();

    Fixture {
        orchestrator: Orchestrator::new(config, backends, event_tx),
        simulator,
        overlay,
        surface,
        platform,
        event_rx,
    }
}
