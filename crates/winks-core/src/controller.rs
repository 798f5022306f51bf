//! Controller: the single event loop that owns the orchestrator.
//!
//! Commands, proximity ticks and drag frames are multiplexed on one thread,
//! so they are handled strictly in receipt order and never race each other.

use crate::{
    Backends, CaptureIntent, Orchestrator, OverlayCommand, OverlayEvent, SettingsStore,
    WinksConfig,
};
use crossbeam_channel::{bounded, select, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Handle to control the controller thread.
pub struct ControllerHandle {
    cmd_tx: Sender<OverlayCommand>,
    event_rx: Receiver<OverlayEvent>,
    thread: Option<JoinHandle<()>>,
}

impl ControllerHandle {
    /// Send a command to the controller.
    pub fn send(&self, cmd: OverlayCommand) {
        if let Err(e) = self.cmd_tx.send(cmd) {
            warn!("Failed to send command to controller: {}", e);
        }
    }

    /// A sender usable from other threads (e.g. a transport reader).
    pub fn commands(&self) -> Sender<OverlayCommand> {
        self.cmd_tx.clone()
    }

    /// The event stream. Disconnects once the controller thread exits.
    pub fn events(&self) -> &Receiver<OverlayEvent> {
        &self.event_rx
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<OverlayEvent, RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }

    /// Stop and wait for the thread to finish.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        let _ = self.cmd_tx.send(OverlayCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ControllerHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

pub struct Controller {
    orchestrator: Orchestrator,
    settings: Option<SettingsStore>,
    cmd_rx: Receiver<OverlayCommand>,
}

impl Controller {
    /// Spawn the controller thread.
    ///
    /// `make_backends` receives the event sender so hosts that talk to the UI
    /// (such as [`crate::EventSurfaceHost`]) can share the event stream.
    pub fn spawn<F>(
        config: WinksConfig,
        settings: Option<SettingsStore>,
        make_backends: F,
    ) -> ControllerHandle
    where
        F: FnOnce(&Sender<OverlayEvent>) -> Backends,
    {
        let (cmd_tx, cmd_rx) = bounded(64);
        let (event_tx, event_rx) = bounded(256);

        let backends = make_backends(&event_tx);
        let start_proximity = config.proximity.enabled;
        let mut orchestrator = Orchestrator::new(config, backends, event_tx);
        if start_proximity {
            orchestrator.start_proximity();
        }

        let controller = Controller {
            orchestrator,
            settings,
            cmd_rx,
        };

        let thread = thread::spawn(move || {
            controller.run_loop();
        });

        ControllerHandle {
            cmd_tx,
            event_rx,
            thread: Some(thread),
        }
    }

    fn run_loop(mut self) {
        info!("Controller thread started");

        loop {
            let proximity = self.orchestrator.proximity_ticks();
            let frames = self.orchestrator.drag_frames();

            select! {
                recv(self.cmd_rx) -> msg => match msg {
                    Ok(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    // All senders gone
                    Err(_) => break,
                },
                recv(proximity) -> _ => self.orchestrator.proximity_tick(),
                recv(frames) -> _ => self.orchestrator.advance_drag(Instant::now()),
            }
        }

        self.orchestrator.shutdown();
        info!("Controller thread exiting");
    }

    /// Handle a command. Returns false if should exit.
    fn handle_command(&mut self, cmd: OverlayCommand) -> bool {
        debug!(?cmd, "handling command");
        let orchestrator = &mut self.orchestrator;

        match cmd {
            OverlayCommand::Scroll { direction } => orchestrator.scroll(direction),
            OverlayCommand::CaptureScrollAnchor => {
                orchestrator.request_capture(CaptureIntent::ScrollAnchor);
            }
            OverlayCommand::CaptureDragPoints => {
                orchestrator.request_capture(CaptureIntent::DragOrigin);
            }
            OverlayCommand::ExecuteDrag => {
                orchestrator.execute_drag(Instant::now());
            }
            OverlayCommand::CancelDrag => {
                orchestrator.cancel_drag();
            }
            OverlayCommand::CaptureOverlayAnchor => {
                orchestrator.request_capture(CaptureIntent::OverlayAnchor);
            }
            OverlayCommand::RelocateOverlay => {
                orchestrator.relocate_overlay();
            }
            OverlayCommand::OpenVirtualKeyboard => orchestrator.open_virtual_keyboard(),
            OverlayCommand::SurfaceClicked => orchestrator.surface_clicked(Instant::now()),
            OverlayCommand::SurfaceClosed => orchestrator.surface_closed(),
            OverlayCommand::OverlayBounds { bounds } => orchestrator.overlay_bounds_reported(bounds),
            OverlayCommand::StartProximity => orchestrator.start_proximity(),
            OverlayCommand::StopProximity => orchestrator.stop_proximity(),
            OverlayCommand::GetCalibration => self.get_calibration(),
            OverlayCommand::UpdateCalibration { patch } => self.update_calibration(&patch),
            OverlayCommand::Shutdown => return false,
        }

        true
    }

    fn get_calibration(&self) {
        match &self.settings {
            Some(store) => self.orchestrator.emit(OverlayEvent::Calibration {
                settings: store.load(),
            }),
            None => self.settings_unavailable(),
        }
    }

    fn update_calibration(&self, patch: &serde_json::Value) {
        let Some(store) = &self.settings else {
            self.settings_unavailable();
            return;
        };

        match store.update(patch) {
            Ok(settings) => self.orchestrator.emit(OverlayEvent::Calibration { settings }),
            Err(e) => {
                warn!(error = %e, "failed to update calibration settings");
                self.orchestrator.emit(OverlayEvent::Error {
                    message: format!("calibration update failed: {e}"),
                });
            }
        }
    }

    fn settings_unavailable(&self) {
        self.orchestrator.emit(OverlayEvent::Error {
            message: "settings store unavailable".into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fake_backends, SimCall};
    use crate::{Rect, ScreenPoint, ScrollDirection};

    const WORK_AREA: Rect = Rect::new(0, 0, 1000, 800);

    fn fast_config() -> WinksConfig {
        let mut config = WinksConfig::default();
        config.proximity.interval_ms = 5;
        config.drag.duration_ms = 40;
        config.drag.frame_interval_ms = 2;
        config.drag.auto_execute_delay_ms = 0;
        config
    }

    /// Wait for the first event matching `pred`.
    fn wait_for(
        handle: &ControllerHandle,
        pred: impl Fn(&OverlayEvent) -> bool,
    ) -> Option<OverlayEvent> {
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if let Ok(event) = handle.recv_timeout(Duration::from_millis(50)) {
                if pred(&event) {
                    return Some(event);
                }
            }
        }
        None
    }

    #[test]
    fn test_proximity_updates_flow() {
        let (backends, simulator, overlay, _surface, _platform) = fake_backends(WORK_AREA);
        overlay.set_bounds(Some(Rect::new(0, 700, 360, 360)));
        simulator.set_cursor(ScreenPoint::new(-149, 700));

        let handle = Controller::spawn(fast_config(), None, |_| backends);

        let event = wait_for(&handle, |e| matches!(e, OverlayEvent::ProximityUpdate { .. }));
        assert_eq!(event, Some(OverlayEvent::ProximityUpdate { is_near: true }));

        simulator.set_cursor(ScreenPoint::new(-151, 700));
        let event = wait_for(&handle, |e| {
            matches!(e, OverlayEvent::ProximityUpdate { is_near: false })
        });
        assert!(event.is_some());

        handle.shutdown();
    }

    #[test]
    fn test_commands_drive_capture_and_drag() {
        let (backends, simulator, _overlay, surface, _platform) = fake_backends(WORK_AREA);
        let mut config = fast_config();
        config.proximity.enabled = false;

        let handle = Controller::spawn(config, None, |_| backends);

        handle.send(OverlayCommand::CaptureDragPoints);
        handle.send(OverlayCommand::CaptureDragPoints);
        simulator.set_cursor(ScreenPoint::new(100, 100));
        handle.send(OverlayCommand::SurfaceClicked);
        assert!(wait_for(&handle, |e| matches!(
            e,
            OverlayEvent::AnchorCaptured {
                intent: CaptureIntent::DragOrigin,
                ..
            }
        ))
        .is_some());

        simulator.set_cursor(ScreenPoint::new(200, 300));
        handle.send(OverlayCommand::SurfaceClicked);

        let finished = wait_for(&handle, |e| matches!(e, OverlayEvent::DragFinished { .. }));
        assert_eq!(finished, Some(OverlayEvent::DragFinished { cancelled: false }));
        assert_eq!(surface.open_windows(), 0);

        let calls = simulator.calls();
        assert_eq!(calls.first(), Some(&SimCall::Move(ScreenPoint::new(100, 100))));
        assert_eq!(
            &calls[calls.len() - 2..],
            &[
                SimCall::Move(ScreenPoint::new(200, 300)),
                SimCall::Button(crate::MouseButton::Left, false),
            ]
        );

        handle.shutdown();
    }

    #[test]
    fn test_scroll_command_is_processed_in_order() {
        let (backends, simulator, _overlay, _surface, _platform) = fake_backends(WORK_AREA);
        let mut config = fast_config();
        config.proximity.enabled = false;

        let handle = Controller::spawn(config, None, |_| backends);
        handle.send(OverlayCommand::Scroll {
            direction: ScrollDirection::Up,
        });
        handle.send(OverlayCommand::Scroll {
            direction: ScrollDirection::Right,
        });
        handle.shutdown();

        let wheel: Vec<i32> = simulator
            .calls()
            .iter()
            .filter_map(|c| match c {
                SimCall::Wheel(d) => Some(*d),
                _ => None,
            })
            .collect();
        assert_eq!(wheel, vec![360, -360]);
    }

    #[test]
    fn test_calibration_without_store_reports_error() {
        let (backends, ..) = fake_backends(WORK_AREA);
        let mut config = fast_config();
        config.proximity.enabled = false;

        let handle = Controller::spawn(config, None, |_| backends);
        handle.send(OverlayCommand::GetCalibration);
        let event = wait_for(&handle, |e| matches!(e, OverlayEvent::Error { .. }));
        assert!(event.is_some());
    }

    #[test]
    fn test_calibration_round_trip_through_store() {
        let (backends, ..) = fake_backends(WORK_AREA);
        let mut config = fast_config();
        config.proximity.enabled = false;

        let dir = std::env::temp_dir().join(format!("winks-controller-{}", std::process::id()));
        let store = SettingsStore::new(dir.join("app-settings.json"));

        let handle = Controller::spawn(config, Some(store), |_| backends);
        handle.send(OverlayCommand::UpdateCalibration {
            patch: serde_json::json!({ "pitch": 30.0 }),
        });

        let event = wait_for(&handle, |e| matches!(e, OverlayEvent::Calibration { .. }));
        match event {
            Some(OverlayEvent::Calibration { settings }) => {
                assert_eq!(settings.pitch, 30.0);
                assert_eq!(settings.yaw, 45.0);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        handle.shutdown();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_event_stream_disconnects_after_shutdown_command() {
        let (backends, ..) = fake_backends(WORK_AREA);
        let mut config = fast_config();
        config.proximity.enabled = false;

        let handle = Controller::spawn(config, None, |_| backends);
        handle.commands().send(OverlayCommand::Shutdown).unwrap();

        let deadline = Instant::now() + Duration::from_secs(3);
        let mut disconnected = false;
        while Instant::now() < deadline {
            if let Err(RecvTimeoutError::Disconnected) =
                handle.events().recv_timeout(Duration::from_millis(50))
            {
                disconnected = true;
                break;
            }
        }
        assert!(disconnected);
    }
}
