//! # Playback Backend Traits
//!
//! Contract between the hybrid playback orchestrator and the backend engines
//! that actually decode and render audio.
//!
//! ## Overview
//!
//! The playback core never talks to a concrete media pipeline. It drives any
//! object satisfying [`MediaBackend`]: one backend plays a single continuous
//! byte stream, the other consumes a segmented adaptive-bitrate manifest.
//! Host applications (or sibling crates) supply the implementations; this
//! crate only defines the surface they must expose.
//!
//! ## Required vs. optional operations
//!
//! Every backend implements the required subset of [`MediaBackend`]: `load`,
//! `play`, `pause`, `stop`, `seek`, volume/mute control, position queries,
//! and event subscription. Extended operations (`preload`, `reload`,
//! `refresh_manifest`, `actual_current_time`, seek tracking, `destroy`) are
//! optional: a backend advertises them through
//! [`MediaBackend::supports`](playback::MediaBackend::supports) and the
//! orchestrator branches on that answer instead of assuming presence.
//!
//! ## Events
//!
//! Backends report playback progress and failures through [`PlayerEvent`]s
//! delivered to handlers registered with `on`/`off`. The
//! [`EventDispatcher`](events::EventDispatcher) type implements that registry
//! so backends do not have to hand-roll one.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`; the orchestrator shares backends across
//! async tasks behind `Arc`.

pub mod error;
pub mod events;
pub mod playback;
pub mod source;

pub use error::{BackendError, Result};
pub use events::{
    EventDispatcher, EventHandler, EventSeverity, ListenerId, PlayerEvent, PlayerEventKind,
};
pub use playback::{BackendCapability, EngineKind, MediaBackend, SegmentedBackendFactory};
pub use source::{LoadOptions, MediaSource, SourceProtocol};
