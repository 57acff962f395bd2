//! # Hybrid Runtime Engine
//!
//! One uniform playback surface over two structurally different backend
//! strategies: a direct byte-stream backend and a segmented adaptive-bitrate
//! backend.
//!
//! ## Engine selection
//!
//! On every `load`/`preload` the engine consults the [`StreamingModeResolver`]
//! and the protocol detector:
//!
//! ```text
//!               ┌────────────────────┐
//!   load(src) ─>│ StreamingMode?     │
//!               └─────────┬──────────┘
//!        force-direct     │    prefer-segmented
//!              │          │          │
//!              ▼          │          ▼
//!           direct        │   is_segmented_protocol(src)?
//!                         │      yes │        │ no
//!                         │          ▼        ▼
//!                         │      segmented  direct
//! ```
//!
//! The segmented backend is constructed lazily, the first time it is needed.
//! If construction fails, the engine logs the failure and quietly degrades to
//! the direct backend — that path never raises.
//!
//! ## Output state
//!
//! Volume and mute are owned by the engine, not by either backend. They are
//! pushed into whichever backend becomes active, and re-pushed after every
//! `load` so a backend's own load cannot silently reset them as observed by
//! callers.
//!
//! ## Event forwarding
//!
//! External listeners register with the engine, never with a backend. The
//! engine binds one forwarder per event kind to each backend; a forwarder
//! consults the shared active-kind flag *at delivery time* and drops events
//! originating from a backend that is allocated but not currently active
//! (e.g. one mid-teardown emitting asynchronously after a switch).

use crate::error::{PlaybackError, Result};
use crate::protocol::is_segmented_protocol;
use backend_traits::{
    BackendCapability, EngineKind, EventDispatcher, EventHandler, ListenerId, LoadOptions,
    MediaBackend, MediaSource, PlayerEventKind, SegmentedBackendFactory,
};
use core_runtime::config::{StreamingMode, StreamingModeResolver};
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Output state owned by the engine and pushed into the active backend.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OutputState {
    volume: f32,
    muted: bool,
}

impl Default for OutputState {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
        }
    }
}

/// The orchestrator presenting one playback surface over both backends.
pub struct HybridEngine {
    direct: Arc<dyn MediaBackend>,
    segmented: Mutex<Option<Arc<dyn MediaBackend>>>,
    segmented_factory: Arc<dyn SegmentedBackendFactory>,
    mode_resolver: Arc<dyn StreamingModeResolver>,
    /// Read by event forwarders at delivery time; written only on switch.
    active: Arc<RwLock<EngineKind>>,
    output: Mutex<OutputState>,
    last_load: Mutex<Option<(MediaSource, LoadOptions)>>,
    listeners: EventDispatcher,
    direct_forwarders: Mutex<Vec<(PlayerEventKind, ListenerId)>>,
    segmented_forwarders: Mutex<Vec<(PlayerEventKind, ListenerId)>>,
}

impl std::fmt::Debug for HybridEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridEngine").finish_non_exhaustive()
    }
}

static GLOBAL_ENGINE: OnceLock<Arc<HybridEngine>> = OnceLock::new();

impl HybridEngine {
    /// Creates a new builder for assembling a `HybridEngine`.
    pub fn builder() -> HybridEngineBuilder {
        HybridEngineBuilder::default()
    }

    /// Process-wide accessor constructing the engine exactly once.
    ///
    /// The first caller's `init` closure runs; every later call returns the
    /// same instance. Teardown is explicit via [`destroy`](Self::destroy) —
    /// dropping handles never tears the engine down implicitly.
    pub fn global_or_init<F>(init: F) -> Arc<HybridEngine>
    where
        F: FnOnce() -> Arc<HybridEngine>,
    {
        GLOBAL_ENGINE.get_or_init(init).clone()
    }

    /// The process-wide instance, if one has been initialized.
    pub fn global() -> Option<Arc<HybridEngine>> {
        GLOBAL_ENGINE.get().cloned()
    }

    // ========================================================================
    // Loading & engine selection
    // ========================================================================

    /// Load a source on the backend its classification prefers, switching
    /// backends when needed.
    ///
    /// Accepts anything convertible into [`LoadOptions`] (a full record, a
    /// bare autoplay flag, or an `(autoplay, format)` pair).
    pub async fn load(&self, source: MediaSource, options: impl Into<LoadOptions>) -> Result<()> {
        let options = options.into();
        *self.last_load.lock() = Some((source.clone(), options.clone()));

        let preferred = self.preferred_kind(&source);
        let (backend, kind) = self.resolve_backend(preferred);

        let current = *self.active.read();
        if kind != current {
            debug!(from = %current, to = %kind, url = %source.url, "switching playback engine");
            let previous = self.backend_for(current);
            // Best-effort: the switch proceeds even if the old backend
            // refuses to stop; its own destroy owns in-flight work.
            if let Err(e) = previous.stop().await {
                warn!(engine = %current, error = %e, "failed to stop previous backend during switch");
            }
            *self.active.write() = kind;
            self.apply_output_state(backend.as_ref());
        }

        backend.load(&source, &options).await?;
        // Re-push so the backend's own load cannot reset volume/mute.
        self.apply_output_state(backend.as_ref());
        Ok(())
    }

    fn preferred_kind(&self, source: &MediaSource) -> EngineKind {
        match self.mode_resolver.streaming_mode() {
            StreamingMode::ForceDirect => EngineKind::Direct,
            StreamingMode::PreferSegmented if is_segmented_protocol(source) => EngineKind::Segmented,
            StreamingMode::PreferSegmented => EngineKind::Direct,
        }
    }

    /// Resolve the backend for a preferred kind, lazily constructing the
    /// segmented backend. Construction failure degrades to direct.
    fn resolve_backend(&self, preferred: EngineKind) -> (Arc<dyn MediaBackend>, EngineKind) {
        match preferred {
            EngineKind::Direct => (self.direct.clone(), EngineKind::Direct),
            EngineKind::Segmented => {
                let mut segmented = self.segmented.lock();
                if let Some(backend) = segmented.as_ref() {
                    return (backend.clone(), EngineKind::Segmented);
                }
                match self.segmented_factory.create() {
                    Ok(backend) => {
                        let forwarders =
                            self.bind_forwarders(backend.as_ref(), EngineKind::Segmented);
                        *self.segmented_forwarders.lock() = forwarders;
                        *segmented = Some(backend.clone());
                        (backend, EngineKind::Segmented)
                    }
                    Err(e) => {
                        warn!(error = %e, "segmented backend unavailable, using direct backend");
                        (self.direct.clone(), EngineKind::Direct)
                    }
                }
            }
        }
    }

    fn backend_for(&self, kind: EngineKind) -> Arc<dyn MediaBackend> {
        match kind {
            EngineKind::Direct => self.direct.clone(),
            // The active flag only ever points at an allocated backend; the
            // direct fallback covers post-destroy stragglers.
            EngineKind::Segmented => self
                .segmented
                .lock()
                .clone()
                .unwrap_or_else(|| self.direct.clone()),
        }
    }

    fn active_backend(&self) -> Arc<dyn MediaBackend> {
        self.backend_for(*self.active.read())
    }

    /// The kind of the currently active backend.
    pub fn active_kind(&self) -> EngineKind {
        *self.active.read()
    }

    // ========================================================================
    // Playback delegation
    // ========================================================================

    /// Begin or resume playback on the active backend.
    pub async fn play(&self) -> Result<()> {
        Ok(self.active_backend().play().await?)
    }

    /// Pause playback on the active backend.
    pub async fn pause(&self) -> Result<()> {
        Ok(self.active_backend().pause().await?)
    }

    /// Stop playback on the active backend.
    pub async fn stop(&self) -> Result<()> {
        Ok(self.active_backend().stop().await?)
    }

    /// Seek the active backend to an absolute position.
    pub async fn seek(&self, position: Duration) -> Result<()> {
        Ok(self.active_backend().seek(position).await?)
    }

    /// Current playback position of the active backend.
    pub fn current_time(&self) -> Duration {
        self.active_backend().current_time()
    }

    /// Duration of the loaded source, when the active backend knows it.
    pub fn duration(&self) -> Option<Duration> {
        self.active_backend().duration()
    }

    /// Whether the active backend is currently playing.
    pub fn is_playing(&self) -> bool {
        self.active_backend().is_playing()
    }

    // ========================================================================
    // Output state
    // ========================================================================

    /// Set the output volume. Clamped into `[0.0, 1.0]`, stored as the source
    /// of truth, then forwarded to the active backend.
    pub fn set_volume(&self, volume: f32) -> Result<()> {
        let volume = volume.clamp(0.0, 1.0);
        self.output.lock().volume = volume;
        Ok(self.active_backend().set_volume(volume)?)
    }

    /// Set the mute flag. Stored, then forwarded to the active backend.
    pub fn set_muted(&self, muted: bool) -> Result<()> {
        self.output.lock().muted = muted;
        Ok(self.active_backend().set_muted(muted)?)
    }

    /// The engine-owned output volume.
    pub fn volume(&self) -> f32 {
        self.output.lock().volume
    }

    /// The engine-owned mute flag.
    pub fn muted(&self) -> bool {
        self.output.lock().muted
    }

    fn apply_output_state(&self, backend: &dyn MediaBackend) {
        let output = *self.output.lock();
        if let Err(e) = backend.set_volume(output.volume) {
            warn!(error = %e, "failed to push volume into backend");
        }
        if let Err(e) = backend.set_muted(output.muted) {
            warn!(error = %e, "failed to push mute state into backend");
        }
    }

    // ========================================================================
    // Event subscription
    // ========================================================================

    /// Register an external listener for one event kind.
    ///
    /// Listeners only ever see events re-emitted by the engine; events from a
    /// backend that is not currently active are dropped, not queued.
    pub fn on(&self, kind: PlayerEventKind, handler: EventHandler) -> ListenerId {
        self.listeners.on(kind, handler)
    }

    /// Remove an external listener. Unknown ids are ignored.
    pub fn off(&self, kind: PlayerEventKind, id: ListenerId) {
        self.listeners.off(kind, id);
    }

    /// Bind one forwarder per event kind to a backend. A forwarder re-emits
    /// only when its backend is the active one at the moment of delivery.
    fn bind_forwarders(
        &self,
        backend: &dyn MediaBackend,
        kind: EngineKind,
    ) -> Vec<(PlayerEventKind, ListenerId)> {
        PlayerEventKind::ALL
            .iter()
            .map(|&event_kind| {
                let active = Arc::clone(&self.active);
                let listeners = self.listeners.clone();
                let handler: EventHandler = Arc::new(move |event| {
                    if *active.read() == kind {
                        listeners.emit(event);
                    }
                });
                (event_kind, backend.on(event_kind, handler))
            })
            .collect()
    }

    // ========================================================================
    // Optional-capability delegation
    // ========================================================================

    /// Warm the backend the source would prefer, without switching engines.
    ///
    /// A deliberate silent no-op when the resolved backend does not implement
    /// preloading.
    pub async fn preload(
        &self,
        source: &MediaSource,
        options: impl Into<LoadOptions>,
    ) -> Result<()> {
        let options = options.into();
        let (backend, kind) = self.resolve_backend(self.preferred_kind(source));
        if backend.supports(BackendCapability::Preload) {
            backend.preload(source, &options).await?;
        } else {
            debug!(engine = %kind, url = %source.url, "preload not supported, skipping");
        }
        Ok(())
    }

    /// Reload the current source: delegated when the active backend can do it
    /// in place, otherwise replayed from the last recorded load.
    pub async fn reload(&self) -> Result<()> {
        let backend = self.active_backend();
        if backend.supports(BackendCapability::Reload) {
            return Ok(backend.reload().await?);
        }

        let last = self.last_load.lock().clone();
        match last {
            Some((source, options)) => self.load(source, options).await,
            None => {
                debug!("reload requested with no prior load, skipping");
                Ok(())
            }
        }
    }

    /// Re-fetch the adaptive manifest. Falls back to [`reload`](Self::reload)
    /// when the active backend cannot refresh in place but the last source
    /// was segmented; no-op for direct sources.
    pub async fn refresh_manifest(&self) -> Result<()> {
        let backend = self.active_backend();
        if backend.supports(BackendCapability::RefreshManifest) {
            return Ok(backend.refresh_manifest().await?);
        }

        let last = self.last_load.lock().clone();
        if let Some((source, _)) = last {
            if is_segmented_protocol(&source) {
                return self.reload().await;
            }
        }
        debug!("manifest refresh not applicable to current source, skipping");
        Ok(())
    }

    /// Playback position unaffected by an in-flight seek; plain position when
    /// the active backend does not track seeks.
    pub fn actual_current_time(&self) -> Duration {
        let backend = self.active_backend();
        if backend.supports(BackendCapability::ActualCurrentTime) {
            backend.actual_current_time()
        } else {
            backend.current_time()
        }
    }

    /// Whether a seek is in flight on the active backend; `false` when it
    /// does not track seeks.
    pub fn is_seeking(&self) -> bool {
        let backend = self.active_backend();
        backend.supports(BackendCapability::SeekTracking) && backend.is_seeking()
    }

    /// Target of an in-flight seek; `None` when the active backend does not
    /// track seeks.
    pub fn seek_target(&self) -> Option<Duration> {
        let backend = self.active_backend();
        if backend.supports(BackendCapability::SeekTracking) {
            backend.seek_target()
        } else {
            None
        }
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Tear the engine down: unbind forwarders from both backends, destroy
    /// the backends that implement destruction, and clear the external
    /// listener registry.
    ///
    /// Safe to call repeatedly; backend teardown failures are logged, never
    /// surfaced.
    pub async fn destroy(&self) {
        for (kind, id) in self.direct_forwarders.lock().drain(..) {
            self.direct.off(kind, id);
        }

        let segmented = self.segmented.lock().take();
        if let Some(backend) = segmented {
            for (kind, id) in self.segmented_forwarders.lock().drain(..) {
                backend.off(kind, id);
            }
            if backend.supports(BackendCapability::Destroy) {
                if let Err(e) = backend.destroy().await {
                    warn!(error = %e, "segmented backend teardown failed");
                }
            }
        }

        if self.direct.supports(BackendCapability::Destroy) {
            if let Err(e) = self.direct.destroy().await {
                warn!(error = %e, "direct backend teardown failed");
            }
        }

        *self.active.write() = EngineKind::Direct;
        self.listeners.clear();
    }
}

/// Builder assembling a [`HybridEngine`] with fail-fast validation.
///
/// # Examples
///
/// ```ignore
/// use core_playback::HybridEngine;
/// use core_runtime::config::{FixedMode, StreamingMode};
/// use std::sync::Arc;
///
/// let engine = HybridEngine::builder()
///     .direct_backend(Arc::new(MyStreamBackend::new()))
///     .segmented_factory(Arc::new(|| MySegmentedBackend::create()))
///     .mode_resolver(Arc::new(FixedMode(StreamingMode::PreferSegmented)))
///     .build()
///     .expect("Failed to assemble engine");
/// ```
#[derive(Default)]
pub struct HybridEngineBuilder {
    direct: Option<Arc<dyn MediaBackend>>,
    segmented_factory: Option<Arc<dyn SegmentedBackendFactory>>,
    mode_resolver: Option<Arc<dyn StreamingModeResolver>>,
}

impl HybridEngineBuilder {
    /// The always-constructed direct byte-stream backend. Required.
    pub fn direct_backend(mut self, backend: Arc<dyn MediaBackend>) -> Self {
        self.direct = Some(backend);
        self
    }

    /// Factory for the lazily-constructed segmented backend. Required.
    pub fn segmented_factory(mut self, factory: Arc<dyn SegmentedBackendFactory>) -> Self {
        self.segmented_factory = Some(factory);
        self
    }

    /// Streaming-mode policy source. Defaults to prefer-segmented.
    pub fn mode_resolver(mut self, resolver: Arc<dyn StreamingModeResolver>) -> Self {
        self.mode_resolver = Some(resolver);
        self
    }

    /// Assemble the engine. The direct backend starts active with its event
    /// forwarders bound.
    pub fn build(self) -> Result<Arc<HybridEngine>> {
        let direct = self.direct.ok_or_else(|| {
            PlaybackError::Config(
                "No direct backend provided. Inject the byte-stream backend \
                 via HybridEngineBuilder::direct_backend."
                    .to_string(),
            )
        })?;
        let segmented_factory = self.segmented_factory.ok_or_else(|| {
            PlaybackError::Config(
                "No segmented backend factory provided. Inject one via \
                 HybridEngineBuilder::segmented_factory."
                    .to_string(),
            )
        })?;
        let mode_resolver = self.mode_resolver.unwrap_or_else(|| {
            Arc::new(core_runtime::config::FixedMode(
                StreamingMode::PreferSegmented,
            ))
        });

        let engine = Arc::new(HybridEngine {
            direct,
            segmented: Mutex::new(None),
            segmented_factory,
            mode_resolver,
            active: Arc::new(RwLock::new(EngineKind::Direct)),
            output: Mutex::new(OutputState::default()),
            last_load: Mutex::new(None),
            listeners: EventDispatcher::new(),
            direct_forwarders: Mutex::new(Vec::new()),
            segmented_forwarders: Mutex::new(Vec::new()),
        });

        let forwarders = engine.bind_forwarders(engine.direct.as_ref(), EngineKind::Direct);
        *engine.direct_forwarders.lock() = forwarders;

        Ok(engine)
    }
}
