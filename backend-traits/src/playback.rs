//! The backend engine contract.
//!
//! Exactly one backend is active at any time; the orchestrator owns that flag
//! and the output state (volume/mute), and pushes state into whichever backend
//! it activates. Backends therefore never act as the source of truth for
//! volume or mute — they are written to, not read.

use crate::error::{BackendError, Result};
use crate::events::{EventHandler, ListenerId, PlayerEventKind};
use crate::source::{LoadOptions, MediaSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Which playback strategy a backend implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Single continuous byte-stream playback.
    Direct,
    /// Manifest-described, segmented adaptive-bitrate playback.
    Segmented,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Direct => write!(f, "direct"),
            EngineKind::Segmented => write!(f, "segmented"),
        }
    }
}

/// Optional operations a backend may implement.
///
/// The orchestrator queries [`MediaBackend::supports`] before calling any of
/// these; a backend that answers `false` is never asked to perform the
/// operation and the orchestrator applies its documented fallback instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCapability {
    /// `preload` — warm caches/buffers for a source without activating it.
    Preload,
    /// `reload` — re-load the current source in place.
    Reload,
    /// `refresh_manifest` — re-fetch the adaptive manifest.
    RefreshManifest,
    /// `actual_current_time` — position unaffected by an in-flight seek.
    ActualCurrentTime,
    /// `is_seeking` / `seek_target` — in-flight seek introspection.
    SeekTracking,
    /// `destroy` — explicit resource teardown.
    Destroy,
}

/// Capability set every playback backend must expose.
///
/// Required methods make up the uniform control surface; methods documented as
/// optional have default bodies and are only invoked after a positive
/// [`supports`](MediaBackend::supports) answer.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Load a source and prepare it for playback.
    ///
    /// Failures are reported both through the returned error and as a
    /// `loaderror` event, so event-driven consumers observe them too.
    async fn load(&self, source: &MediaSource, options: &LoadOptions) -> Result<()>;

    /// Begin or resume playback.
    ///
    /// May resolve asynchronously (the platform can defer or reject playback
    /// start); callers receive the outcome unchanged.
    async fn play(&self) -> Result<()>;

    /// Pause playback, preserving position.
    async fn pause(&self) -> Result<()>;

    /// Stop playback and reset position.
    async fn stop(&self) -> Result<()>;

    /// Seek to an absolute position.
    async fn seek(&self, position: Duration) -> Result<()>;

    /// Apply an output volume in `[0.0, 1.0]`. The caller clamps.
    fn set_volume(&self, volume: f32) -> Result<()>;

    /// Apply the mute flag.
    fn set_muted(&self, muted: bool) -> Result<()>;

    /// Current playback position.
    fn current_time(&self) -> Duration;

    /// Total duration of the loaded source, when known.
    fn duration(&self) -> Option<Duration>;

    /// Whether audio is currently playing.
    fn is_playing(&self) -> bool;

    /// Register an event handler for one event kind.
    fn on(&self, kind: PlayerEventKind, handler: EventHandler) -> ListenerId;

    /// Remove a previously registered handler. Unknown ids are ignored.
    fn off(&self, kind: PlayerEventKind, id: ListenerId);

    /// Whether this backend implements an optional operation.
    fn supports(&self, _capability: BackendCapability) -> bool {
        false
    }

    /// Optional: warm caches for a source without activating it.
    async fn preload(&self, _source: &MediaSource, _options: &LoadOptions) -> Result<()> {
        Err(BackendError::NotSupported("preload"))
    }

    /// Optional: re-load the current source in place.
    async fn reload(&self) -> Result<()> {
        Err(BackendError::NotSupported("reload"))
    }

    /// Optional: re-fetch the adaptive manifest.
    async fn refresh_manifest(&self) -> Result<()> {
        Err(BackendError::NotSupported("refresh_manifest"))
    }

    /// Optional: playback position unaffected by an in-flight seek.
    fn actual_current_time(&self) -> Duration {
        self.current_time()
    }

    /// Optional: whether a seek is currently in flight.
    fn is_seeking(&self) -> bool {
        false
    }

    /// Optional: target position of an in-flight seek.
    fn seek_target(&self) -> Option<Duration> {
        None
    }

    /// Optional: release all resources held by this backend.
    async fn destroy(&self) -> Result<()> {
        Ok(())
    }
}

/// Lazy, fallible constructor for the segmented backend.
///
/// The orchestrator only invokes this the first time a segmented source is
/// requested; a construction failure is recovered by falling back to the
/// direct backend, so implementations should return a descriptive
/// [`BackendError::Construction`] rather than panic.
pub trait SegmentedBackendFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn MediaBackend>>;
}

impl<F> SegmentedBackendFactory for F
where
    F: Fn() -> Result<Arc<dyn MediaBackend>> + Send + Sync,
{
    fn create(&self) -> Result<Arc<dyn MediaBackend>> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_kind_display_matches_tags() {
        assert_eq!(EngineKind::Direct.to_string(), "direct");
        assert_eq!(EngineKind::Segmented.to_string(), "segmented");
    }

    #[test]
    fn factory_closures_satisfy_the_trait() {
        let factory = || -> Result<Arc<dyn MediaBackend>> {
            Err(BackendError::Construction("unavailable in tests".into()))
        };
        assert!(SegmentedBackendFactory::create(&factory).is_err());
    }
}
