//! Common error types for winks-platform.

use thiserror::Error;
use winks_core::InputError;

/// Platform-level errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("not implemented")]
    NotImplemented,
    #[error("injection failed: {0}")]
    InjectionFailed(String),
    #[error("window not found: {0}")]
    WindowNotFound(String),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

impl From<PlatformError> for InputError {
    fn from(e: PlatformError) -> Self {
        match e {
            PlatformError::NotImplemented => InputError::Unsupported(e.to_string()),
            PlatformError::InjectionFailed(msg) => InputError::Os(msg),
            PlatformError::WindowNotFound(_) => InputError::WindowGone,
        }
    }
}
