//! Error types for OS-facing calls made by the orchestrator.

use thiserror::Error;

/// Failures reported by simulator, window and platform backends.
///
/// None of these are fatal: the orchestrator logs them and carries on.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("os call failed: {0}")]
    Os(String),
    #[error("not supported on this platform: {0}")]
    Unsupported(String),
    #[error("window is gone")]
    WindowGone,
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type InputResult<T> = Result<T, InputError>;
