//! # Logging & Tracing Infrastructure
//!
//! Configures the `tracing-subscriber` stack used by the playback crates.
//!
//! ## Usage
//!
//! ```no_run
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Pretty)
//!     .with_filter("core_playback=debug");
//!
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("Playback core started");
//! ```
//!
//! The `RUST_LOG` environment variable, when set, overrides the configured
//! filter string.

use crate::error::{Error, Result};
use tracing_subscriber::filter::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset
    /// (e.g., "core_playback=debug,backend_traits=trace")
    pub filter: String,
    /// Display target module in logs
    pub display_target: bool,
    /// Display thread info
    pub display_thread_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: "info".to_string(),
            display_target: true,
            display_thread_info: false,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the fallback filter directive
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Toggle target display
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }

    /// Toggle thread info display
    pub fn with_thread_info(mut self, display: bool) -> Self {
        self.display_thread_info = display;
        self
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns an error if a subscriber is already installed for this process.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.display_target)
        .with_thread_names(config.display_thread_info);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| Error::Internal(format!("Failed to install subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_filters_at_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter, "info");
        assert!(config.display_target);
        assert!(!config.display_thread_info);
    }

    #[test]
    fn builder_methods_apply() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_filter("core_playback=trace")
            .with_thread_info(true);

        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.filter, "core_playback=trace");
        assert!(config.display_thread_info);
    }
}
