//! # Streaming-Mode Configuration
//!
//! The hybrid playback engine selects a backend strategy per load, and the
//! policy half of that decision lives outside the engine: a
//! [`StreamingModeResolver`] answers "which strategy does the application
//! currently want?" while the engine combines that answer with protocol
//! detection on the concrete source.
//!
//! ## Overview
//!
//! Hosts typically back the resolver with their settings store or a feature
//! flag. The resolver is consulted on **every** `load`/`preload` call — its
//! answer is never cached by the engine, so a settings change takes effect on
//! the very next load.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::config::{FixedMode, StreamingMode, StreamingModeResolver};
//!
//! // A constant policy:
//! let resolver = FixedMode(StreamingMode::PreferSegmented);
//! assert_eq!(resolver.streaming_mode(), StreamingMode::PreferSegmented);
//!
//! // Or any closure, e.g. one reading a live settings value:
//! let resolver = || StreamingMode::ForceDirect;
//! assert_eq!(resolver.streaming_mode(), StreamingMode::ForceDirect);
//! ```

use serde::{Deserialize, Serialize};

/// Application-level streaming policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamingMode {
    /// Always use the direct byte-stream backend, regardless of what the
    /// source looks like.
    ForceDirect,
    /// Use the segmented backend when the source classifies as a segmented
    /// protocol; fall back to direct otherwise.
    PreferSegmented,
}

/// Zero-argument policy source consulted on every load.
pub trait StreamingModeResolver: Send + Sync {
    fn streaming_mode(&self) -> StreamingMode;
}

impl<F> StreamingModeResolver for F
where
    F: Fn() -> StreamingMode + Send + Sync,
{
    fn streaming_mode(&self) -> StreamingMode {
        self()
    }
}

/// Resolver returning one constant mode. Useful for tests and for hosts
/// without a runtime toggle.
#[derive(Debug, Clone, Copy)]
pub struct FixedMode(pub StreamingMode);

impl StreamingModeResolver for FixedMode {
    fn streaming_mode(&self) -> StreamingMode {
        self.0
    }
}
