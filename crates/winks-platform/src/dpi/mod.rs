//! DPI scaling utilities.
//!
//! Cursor reads, window rects and injected moves must all agree on physical
//! pixels, otherwise anchors drift on scaled displays.
//!
//! Platform implementations:
//! - Windows: Uses Per-Monitor V2 DPI awareness (`windows.rs`)
//! - Elsewhere: the system scales transparently, nothing to set up

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::{get_primary_scale_factor, set_dpi_aware};

#[cfg(not(windows))]
mod fallback {
    /// Set DPI awareness (no-op outside Windows).
    pub fn set_dpi_aware() {}

    pub fn get_primary_scale_factor() -> f64 {
        1.0
    }
}

#[cfg(not(windows))]
pub use fallback::{get_primary_scale_factor, set_dpi_aware};
