//! Source descriptors and load options shared between the orchestrator and
//! backend engines.
//!
//! A [`MediaSource`] is immutable once handed to `load`; changing the source
//! means building a new descriptor. The optional `protocol` and `mime_type`
//! fields are classification hints only — the URL is the one field that is
//! always present.

use serde::{Deserialize, Serialize};

/// Delivery protocol hint attached to a source by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceProtocol {
    /// Segmented adaptive-bitrate delivery described by a DASH manifest.
    Dash,
    /// Any other protocol tag the caller chose to attach.
    Other(String),
}

/// Descriptor for a playable audio source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    /// URL of the byte stream or manifest. Always present.
    pub url: String,
    /// Explicit protocol tag, when the caller knows the delivery mechanism.
    pub protocol: Option<SourceProtocol>,
    /// Declared media type of the resource (e.g. a manifest MIME type).
    pub mime_type: Option<String>,
}

impl MediaSource {
    /// Create a source descriptor from a URL with no classification hints.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            protocol: None,
            mime_type: None,
        }
    }

    /// Attach an explicit protocol tag.
    pub fn with_protocol(mut self, protocol: SourceProtocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Attach a declared media type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Options recognized by `load` and `preload`.
///
/// Callers may pass a full options record, a bare autoplay flag, or an
/// `(autoplay, format)` pair — the `From` conversions below normalize every
/// shape into this canonical record at the API boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Start playback as soon as the source is ready.
    pub autoplay: bool,
    /// Requested stream format/container, when the caller has a preference.
    pub format: Option<String>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl From<bool> for LoadOptions {
    fn from(autoplay: bool) -> Self {
        Self {
            autoplay,
            format: None,
        }
    }
}

impl From<(bool, &str)> for LoadOptions {
    fn from((autoplay, format): (bool, &str)) -> Self {
        Self {
            autoplay,
            format: Some(format.to_string()),
        }
    }
}

impl From<(bool, String)> for LoadOptions {
    fn from((autoplay, format): (bool, String)) -> Self {
        Self {
            autoplay,
            format: Some(format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_builder_attaches_hints() {
        let source = MediaSource::new("https://example.com/stream.mpd")
            .with_protocol(SourceProtocol::Dash)
            .with_mime_type("application/dash+xml");

        assert_eq!(source.url, "https://example.com/stream.mpd");
        assert_eq!(source.protocol, Some(SourceProtocol::Dash));
        assert_eq!(source.mime_type.as_deref(), Some("application/dash+xml"));
    }

    #[test]
    fn load_options_normalize_from_autoplay_flag() {
        let opts: LoadOptions = true.into();
        assert!(opts.autoplay);
        assert_eq!(opts.format, None);
    }

    #[test]
    fn load_options_normalize_from_autoplay_and_format() {
        let opts: LoadOptions = (false, "flac").into();
        assert!(!opts.autoplay);
        assert_eq!(opts.format.as_deref(), Some("flac"));
    }

    #[test]
    fn load_options_default_is_no_autoplay() {
        let opts = LoadOptions::default();
        assert!(!opts.autoplay);
        assert!(opts.format.is_none());
    }
}
