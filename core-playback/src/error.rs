//! # Playback Error Types
//!
//! Error types for the hybrid engine. Backend failures pass through
//! unchanged; segmented-backend construction failures never surface here at
//! all — they are recovered internally by falling back to the direct backend.

use backend_traits::BackendError;
use thiserror::Error;

/// Errors that can occur during hybrid playback orchestration.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// An operation on the active backend failed. The backend's outcome is
    /// propagated unchanged.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Engine was assembled with an invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation that needs a loaded source was called before any `load`.
    #[error("No source loaded")]
    NoSourceLoaded,

    /// Internal error (should not occur in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlaybackError {
    /// Returns `true` if this error originated inside a backend engine.
    pub fn is_backend(&self) -> bool {
        matches!(self, PlaybackError::Backend(_))
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
