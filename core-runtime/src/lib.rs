//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the playback core:
//! - Logging and tracing infrastructure
//! - Streaming-mode configuration
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the playback crates depend on.
//! It establishes the logging conventions and exposes the streaming-mode
//! facility the hybrid engine consults when choosing a backend strategy.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{FixedMode, StreamingMode, StreamingModeResolver};
pub use error::{Error, Result};
