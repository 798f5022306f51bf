//! winks-platform: platform-specific I/O boundary for winks.
//!
//! This crate provides:
//! - Pointer and modifier injection via `enigo`
//! - Native overlay window lookup and placement (Win32)
//! - On-screen keyboard launching per OS
//! - DPI awareness setup for high-resolution displays
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `simulator` - Input simulation (shared implementation using enigo)
//! - `window` - Overlay window lookup and placement
//! - `keyboard` - On-screen keyboard launcher
//! - `dpi` - DPI scaling utilities

mod dpi;
mod error;
mod keyboard;
mod simulator;
mod window;

pub use dpi::{get_primary_scale_factor, set_dpi_aware};
pub use error::{PlatformError, PlatformResult};
pub use keyboard::{LaunchCommand, VirtualKeyboardLauncher};
pub use simulator::EnigoSimulator;
pub use window::{overlay_window, primary_work_area, NativeOverlayWindow};
