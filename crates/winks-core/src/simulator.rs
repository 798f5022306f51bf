//! Input simulation boundary and pointer animation.

use crate::{InputResult, Modifier, MouseButton, Rect, ScreenPoint};
use std::time::{Duration, Instant};
use tracing::debug;

/// Trait for injecting pointer and keyboard input into the OS.
///
/// Every call is a cheap synchronous OS call. Callers log failures and move
/// on; nothing here is retried.
pub trait InputSimulator: Send {
    /// Read the live OS cursor position.
    fn cursor_position(&self) -> InputResult<ScreenPoint>;

    /// Work area of the primary display.
    fn primary_work_area(&self) -> InputResult<Rect>;

    /// Teleport the pointer to `point`.
    fn move_cursor(&self, point: ScreenPoint) -> InputResult<()>;

    /// Inject a raw vertical wheel delta. Positive scrolls away from the user.
    fn scroll_wheel(&self, delta: i32) -> InputResult<()>;

    fn set_modifier(&self, key: Modifier, down: bool) -> InputResult<()>;

    fn toggle_mouse_button(&self, button: MouseButton, down: bool) -> InputResult<()>;
}

/// Simulator that only logs, for running without OS access.
pub struct NoopSimulator {
    work_area: Rect,
}

impl NoopSimulator {
    pub fn new(work_area: Rect) -> Self {
        Self { work_area }
    }
}

impl InputSimulator for NoopSimulator {
    fn cursor_position(&self) -> InputResult<ScreenPoint> {
        Ok(self.work_area.center())
    }

    fn primary_work_area(&self) -> InputResult<Rect> {
        Ok(self.work_area)
    }

    fn move_cursor(&self, point: ScreenPoint) -> InputResult<()> {
        debug!(?point, "NoopSimulator: would move cursor");
        Ok(())
    }

    fn scroll_wheel(&self, delta: i32) -> InputResult<()> {
        debug!(delta, "NoopSimulator: would scroll");
        Ok(())
    }

    fn set_modifier(&self, key: Modifier, down: bool) -> InputResult<()> {
        debug!(?key, down, "NoopSimulator: would toggle modifier");
        Ok(())
    }

    fn toggle_mouse_button(&self, button: MouseButton, down: bool) -> InputResult<()> {
        debug!(?button, down, "NoopSimulator: would toggle button");
        Ok(())
    }
}

/// A pointer move interpolated over a duration.
///
/// The owner samples it once per frame and feeds the result to
/// [`InputSimulator::move_cursor`], so the move never blocks the caller.
#[derive(Debug, Clone, Copy)]
pub struct SmoothMove {
    from: ScreenPoint,
    to: ScreenPoint,
    started: Instant,
    duration: Duration,
}

impl SmoothMove {
    pub fn new(from: ScreenPoint, to: ScreenPoint, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn destination(&self) -> ScreenPoint {
        self.to
    }

    /// Fraction of the move completed at `now`, clamped to `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Linearly interpolated pointer position at `now`.
    pub fn position_at(&self, now: Instant) -> ScreenPoint {
        let t = self.progress(now);
        let lerp = |a: i32, b: i32| a + ((f64::from(b) - f64::from(a)) * t).round() as i32;
        ScreenPoint::new(lerp(self.from.x, self.to.x), lerp(self.from.y, self.to.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_move_endpoints() {
        let start = Instant::now();
        let mv = SmoothMove::new(
            ScreenPoint::new(100, 100),
            ScreenPoint::new(300, 500),
            start,
            Duration::from_millis(1800),
        );

        assert_eq!(mv.position_at(start), ScreenPoint::new(100, 100));
        assert_eq!(
            mv.position_at(start + Duration::from_millis(900)),
            ScreenPoint::new(200, 300)
        );
        assert_eq!(
            mv.position_at(start + Duration::from_secs(5)),
            ScreenPoint::new(300, 500)
        );
        assert!(!mv.is_finished(start + Duration::from_millis(1799)));
        assert!(mv.is_finished(start + Duration::from_millis(1800)));
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let start = Instant::now();
        let mv = SmoothMove::new(
            ScreenPoint::new(0, 0),
            ScreenPoint::new(-40, 25),
            start,
            Duration::ZERO,
        );
        assert!(mv.is_finished(start));
        assert_eq!(mv.position_at(start), ScreenPoint::new(-40, 25));
    }

    #[test]
    fn test_noop_simulator_reports_center() {
        let sim = NoopSimulator::new(Rect::new(0, 0, 1920, 1080));
        assert_eq!(sim.cursor_position().unwrap(), ScreenPoint::new(960, 540));
        assert!(sim.scroll_wheel(360).is_ok());
    }
}
