//! # Player Event Types & Dispatch
//!
//! Typed events emitted by backend engines and re-emitted by the hybrid
//! orchestrator, plus the listener registry both sides use to deliver them.
//!
//! ## Overview
//!
//! The event system consists of:
//! - **[`PlayerEvent`]**: strongly-typed event payloads covering the whole
//!   playback lifecycle, from `load` through `error`
//! - **[`PlayerEventKind`]**: the fieldless tag used to key subscriptions
//! - **[`EventDispatcher`]**: a clonable per-kind listener registry with
//!   synchronous delivery
//!
//! ## Delivery model
//!
//! Delivery is synchronous and single-threaded from the emitter's point of
//! view: `emit` invokes every handler registered for the event's kind before
//! returning. Handlers may re-enter the dispatcher (registering or removing
//! listeners from inside a handler is allowed) because the registration list
//! is snapshotted before any handler runs.
//!
//! External consumers never subscribe to a backend directly; they register
//! with the orchestrator, which forwards backend events only while the
//! originating backend is the active one.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Handler invoked synchronously for each delivered event.
pub type EventHandler = Arc<dyn Fn(&PlayerEvent) + Send + Sync>;

/// Opaque handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

// ============================================================================
// Event Types
// ============================================================================

/// Events emitted over the lifetime of a playback session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum PlayerEvent {
    /// A source finished loading and is ready for playback.
    Load {
        /// URL of the loaded source.
        url: String,
    },
    /// Playback started or resumed.
    Play,
    /// Playback paused.
    Pause,
    /// Playback stopped and position reset.
    Stop,
    /// The stream played through to its end.
    End,
    /// A seek completed.
    Seek {
        /// Position seeked to (milliseconds).
        position_ms: u64,
    },
    /// Periodic playback position update.
    #[serde(rename = "timeupdate")]
    TimeUpdate {
        /// Current position (milliseconds).
        position_ms: u64,
        /// Total duration (milliseconds), when known.
        duration_ms: Option<u64>,
    },
    /// Output volume or mute state changed.
    Volume {
        /// Volume in `[0.0, 1.0]`.
        volume: f32,
        /// Whether output is muted.
        muted: bool,
    },
    /// The backend entered or left a buffering stall.
    Buffering {
        /// `true` while playback is stalled waiting for data.
        active: bool,
    },
    /// Loading a source failed.
    #[serde(rename = "loaderror")]
    LoadError {
        /// Human-readable failure description.
        message: String,
    },
    /// Starting playback failed (e.g. rejected by the platform).
    #[serde(rename = "playerror")]
    PlayError {
        /// Human-readable failure description.
        message: String,
    },
    /// Unclassified playback error.
    Error {
        /// Human-readable failure description.
        message: String,
        /// Whether playback can be retried.
        recoverable: bool,
    },
    /// A segmented backend fetched (or failed to fetch) its manifest.
    #[serde(rename = "manifestresponse")]
    ManifestResponse {
        /// URL of the manifest request.
        url: String,
        /// HTTP status of the response, when one was received.
        status: Option<u16>,
    },
}

impl PlayerEvent {
    /// The fieldless tag for this event, used to key subscriptions.
    pub fn kind(&self) -> PlayerEventKind {
        match self {
            PlayerEvent::Load { .. } => PlayerEventKind::Load,
            PlayerEvent::Play => PlayerEventKind::Play,
            PlayerEvent::Pause => PlayerEventKind::Pause,
            PlayerEvent::Stop => PlayerEventKind::Stop,
            PlayerEvent::End => PlayerEventKind::End,
            PlayerEvent::Seek { .. } => PlayerEventKind::Seek,
            PlayerEvent::TimeUpdate { .. } => PlayerEventKind::TimeUpdate,
            PlayerEvent::Volume { .. } => PlayerEventKind::Volume,
            PlayerEvent::Buffering { .. } => PlayerEventKind::Buffering,
            PlayerEvent::LoadError { .. } => PlayerEventKind::LoadError,
            PlayerEvent::PlayError { .. } => PlayerEventKind::PlayError,
            PlayerEvent::Error { .. } => PlayerEventKind::Error,
            PlayerEvent::ManifestResponse { .. } => PlayerEventKind::ManifestResponse,
        }
    }

    /// Severity used by consumers to pick a log level.
    pub fn severity(&self) -> EventSeverity {
        match self {
            PlayerEvent::LoadError { .. }
            | PlayerEvent::PlayError { .. }
            | PlayerEvent::Error { .. } => EventSeverity::Error,
            PlayerEvent::Load { .. } | PlayerEvent::Play | PlayerEvent::Stop => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }

    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            PlayerEvent::Load { .. } => "Source loaded",
            PlayerEvent::Play => "Playback started",
            PlayerEvent::Pause => "Playback paused",
            PlayerEvent::Stop => "Playback stopped",
            PlayerEvent::End => "Playback completed",
            PlayerEvent::Seek { .. } => "Seek completed",
            PlayerEvent::TimeUpdate { .. } => "Playback position changed",
            PlayerEvent::Volume { .. } => "Output volume changed",
            PlayerEvent::Buffering { .. } => "Buffering state changed",
            PlayerEvent::LoadError { .. } => "Source failed to load",
            PlayerEvent::PlayError { .. } => "Playback failed to start",
            PlayerEvent::Error { .. } => "Playback error",
            PlayerEvent::ManifestResponse { .. } => "Manifest response received",
        }
    }
}

/// Fieldless event tag for keying subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerEventKind {
    Load,
    Play,
    Pause,
    Stop,
    End,
    Seek,
    #[serde(rename = "timeupdate")]
    TimeUpdate,
    Volume,
    Buffering,
    #[serde(rename = "loaderror")]
    LoadError,
    #[serde(rename = "playerror")]
    PlayError,
    Error,
    #[serde(rename = "manifestresponse")]
    ManifestResponse,
}

impl PlayerEventKind {
    /// Every event kind, in declaration order. Used by the orchestrator to
    /// bind one forwarder per kind to each backend.
    pub const ALL: [PlayerEventKind; 13] = [
        PlayerEventKind::Load,
        PlayerEventKind::Play,
        PlayerEventKind::Pause,
        PlayerEventKind::Stop,
        PlayerEventKind::End,
        PlayerEventKind::Seek,
        PlayerEventKind::TimeUpdate,
        PlayerEventKind::Volume,
        PlayerEventKind::Buffering,
        PlayerEventKind::LoadError,
        PlayerEventKind::PlayError,
        PlayerEventKind::Error,
        PlayerEventKind::ManifestResponse,
    ];
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

// ============================================================================
// Event Dispatcher
// ============================================================================

struct Registration {
    id: ListenerId,
    handler: EventHandler,
}

/// Per-kind listener registry with synchronous delivery.
///
/// Cloning a dispatcher yields another handle to the same registry, so a
/// backend and the closures it hands out can share one instance.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    inner: Arc<Mutex<HashMap<PlayerEventKind, Vec<Registration>>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind. Returns the id used to remove it.
    pub fn on(&self, kind: PlayerEventKind, handler: EventHandler) -> ListenerId {
        let id = ListenerId::new();
        self.inner
            .lock()
            .entry(kind)
            .or_default()
            .push(Registration { id, handler });
        id
    }

    /// Remove a previously registered handler. Removing an unknown id is a
    /// no-op; returns whether a handler was actually removed.
    pub fn off(&self, kind: PlayerEventKind, id: ListenerId) -> bool {
        let mut inner = self.inner.lock();
        match inner.get_mut(&kind) {
            Some(registrations) => {
                let before = registrations.len();
                registrations.retain(|r| r.id != id);
                registrations.len() != before
            }
            None => false,
        }
    }

    /// Deliver an event to every handler registered for its kind.
    ///
    /// Returns the number of handlers invoked. The handler list is snapshotted
    /// before delivery so handlers may re-enter the dispatcher.
    pub fn emit(&self, event: &PlayerEvent) -> usize {
        let handlers: Vec<EventHandler> = {
            let inner = self.inner.lock();
            inner
                .get(&event.kind())
                .map(|registrations| registrations.iter().map(|r| r.handler.clone()).collect())
                .unwrap_or_default()
        };

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Drop every registered handler.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Number of handlers currently registered for a kind.
    pub fn listener_count(&self, kind: PlayerEventKind) -> usize {
        self.inner.lock().get(&kind).map_or(0, Vec::len)
    }
}
