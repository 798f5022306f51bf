//! Access to the overlay window's bounds and position.

use crate::{InputError, InputResult, Rect, ScreenPoint};
use tracing::{debug, warn};

/// The always-on-top overlay window hosting the radial menu.
pub trait OverlayWindow: Send {
    /// Current bounds read from the windowing system; `None` once destroyed.
    fn bounds(&self) -> Option<Rect>;

    /// Move the window's top-left corner to `origin`.
    fn set_position(&mut self, origin: ScreenPoint) -> InputResult<()>;

    /// Bounds reported by the UI shell. Native implementations ignore it.
    fn report_bounds(&mut self, _bounds: Option<Rect>) {}
}

/// Overlay whose bounds are reported by the UI shell over the command channel.
///
/// Used where the overlay window cannot be looked up natively. The shell
/// applies moves itself when it sees the `overlayMoved` event.
#[derive(Debug, Default)]
pub struct ReportedOverlayWindow {
    bounds: Option<Rect>,
}

impl ReportedOverlayWindow {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverlayWindow for ReportedOverlayWindow {
    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    fn set_position(&mut self, origin: ScreenPoint) -> InputResult<()> {
        let bounds = self.bounds.as_mut().ok_or(InputError::WindowGone)?;
        bounds.x = origin.x;
        bounds.y = origin.y;
        debug!(?origin, "Overlay position updated");
        Ok(())
    }

    fn report_bounds(&mut self, bounds: Option<Rect>) {
        if bounds.is_none() && self.bounds.is_some() {
            warn!("Overlay reported gone");
        }
        self.bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_bounds_follow_moves() {
        let mut overlay = ReportedOverlayWindow::new();
        assert!(overlay.bounds().is_none());
        assert!(matches!(
            overlay.set_position(ScreenPoint::new(0, 0)),
            Err(InputError::WindowGone)
        ));

        overlay.report_bounds(Some(Rect::new(0, 700, 360, 360)));
        overlay.set_position(ScreenPoint::new(1560, 0)).unwrap();
        assert_eq!(overlay.bounds(), Some(Rect::new(1560, 0, 360, 360)));

        overlay.report_bounds(None);
        assert!(overlay.bounds().is_none());
    }

    struct FixedWindow(Rect);

    impl OverlayWindow for FixedWindow {
        fn bounds(&self) -> Option<Rect> {
            Some(self.0)
        }

        fn set_position(&mut self, _origin: ScreenPoint) -> InputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_native_windows_ignore_reported_bounds() {
        let mut window = FixedWindow(Rect::new(10, 10, 360, 360));
        window.report_bounds(None);
        assert_eq!(window.bounds(), Some(Rect::new(10, 10, 360, 360)));
    }
}
