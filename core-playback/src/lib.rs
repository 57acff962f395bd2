//! # Hybrid Playback Module
//!
//! The playback core of the client: turns a requested audio source into sound
//! regardless of whether that source is one continuous byte stream or a
//! segmented adaptive-bitrate manifest.
//!
//! ## Overview
//!
//! This module handles:
//! - Engine selection between the direct and segmented backend strategies
//! - One uniform control surface over both strategies ([`HybridEngine`])
//! - Event multiplexing filtered by the currently active backend
//! - Protocol classification of requested sources
//! - Recovery of the adaptive-bitrate representation id from segment URIs

pub mod error;
pub mod hybrid;
pub mod protocol;
pub mod segments;

pub use error::{PlaybackError, Result};
pub use hybrid::{HybridEngine, HybridEngineBuilder};
pub use protocol::{is_segmented_protocol, DASH_MANIFEST_MIME};
pub use segments::{asset_name_from_uri, representation_id_from_asset_name, representation_id_from_uri};
