//! Windows DPI awareness implementation.

use std::sync::Once;
use tracing::{info, warn};
use windows_sys::Win32::UI::HiDpi::{
    GetDpiForSystem, SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};

static INIT: Once = Once::new();

/// Set the process DPI awareness to Per-Monitor V2.
///
/// Must be called before the first cursor read or window lookup.
pub fn set_dpi_aware() {
    INIT.call_once(|| {
        let result =
            unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) };
        if result != 0 {
            info!("Set Per-Monitor V2 DPI awareness");
        } else {
            warn!("Failed to set Per-Monitor V2 DPI awareness, coordinates may be scaled");
        }
    });
}

/// DPI scale factor of the primary monitor (1.0 at 96 DPI).
pub fn get_primary_scale_factor() -> f64 {
    let dpi = unsafe { GetDpiForSystem() };
    dpi as f64 / 96.0
}
