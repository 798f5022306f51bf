//! Overlay window lookup and placement.
//!
//! Platform implementations:
//! - Windows: Uses Win32 API (`windows.rs`)
//! - Elsewhere: no native lookup; the UI shell reports bounds instead

use crate::PlatformError;
use std::cell::Cell;
use tracing::{debug, info};
use winks_core::{
    InputResult, OverlayConfig, OverlayWindow, Rect, ReportedOverlayWindow, ScreenPoint,
};

#[cfg(windows)]
mod windows;

/// Overlay window found by title through the native window API.
///
/// The handle is looked up lazily and re-resolved once the window is gone,
/// so a recreated overlay is picked up again.
pub struct NativeOverlayWindow {
    title: String,
    handle: Cell<Option<usize>>,
}

impl NativeOverlayWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            handle: Cell::new(None),
        }
    }

    fn resolve(&self) -> Option<usize> {
        if let Some(handle) = self.handle.get() {
            if is_window(handle) {
                return Some(handle);
            }
            debug!(title = %self.title, "cached overlay handle went stale");
        }

        let found = find_window_by_title(&self.title);
        if found.is_some() {
            debug!(title = %self.title, "overlay window resolved");
        }
        self.handle.set(found);
        found
    }
}

impl OverlayWindow for NativeOverlayWindow {
    fn bounds(&self) -> Option<Rect> {
        self.resolve().and_then(get_window_rect)
    }

    fn set_position(&mut self, origin: ScreenPoint) -> InputResult<()> {
        let handle = self
            .resolve()
            .ok_or_else(|| PlatformError::WindowNotFound(self.title.clone()))?;
        move_window(handle, origin)?;
        Ok(())
    }
}

/// Pick the overlay window backend for this platform.
pub fn overlay_window(config: &OverlayConfig) -> Box<dyn OverlayWindow> {
    if cfg!(windows) {
        info!(title = %config.window_title, "Using native overlay window lookup");
        Box::new(NativeOverlayWindow::new(config.window_title.clone()))
    } else {
        info!("Using shell-reported overlay bounds");
        Box::new(ReportedOverlayWindow::new())
    }
}

/// Work area of the primary display, excluding taskbars and docks.
pub fn primary_work_area() -> Option<Rect> {
    #[cfg(windows)]
    {
        windows::primary_work_area()
    }
    #[cfg(not(windows))]
    {
        None
    }
}

/// Find a visible window by title (partial match, case-insensitive).
fn find_window_by_title(title: &str) -> Option<usize> {
    #[cfg(windows)]
    {
        let title_lower = title.to_lowercase();
        windows::list_windows()
            .into_iter()
            .find(|(_, t)| t.to_lowercase().contains(&title_lower))
            .map(|(handle, _)| handle)
    }
    #[cfg(not(windows))]
    {
        let _ = title;
        None
    }
}

fn is_window(handle: usize) -> bool {
    #[cfg(windows)]
    {
        windows::is_window(handle)
    }
    #[cfg(not(windows))]
    {
        let _ = handle;
        false
    }
}

fn get_window_rect(handle: usize) -> Option<Rect> {
    #[cfg(windows)]
    {
        windows::get_window_rect(handle)
    }
    #[cfg(not(windows))]
    {
        let _ = handle;
        None
    }
}

fn move_window(handle: usize, origin: ScreenPoint) -> Result<(), PlatformError> {
    #[cfg(windows)]
    {
        windows::move_window(handle, origin)
    }
    #[cfg(not(windows))]
    {
        let _ = (handle, origin);
        Err(PlatformError::NotImplemented)
    }
}
