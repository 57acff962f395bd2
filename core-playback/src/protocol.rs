//! Protocol classification of requested sources.
//!
//! Classification never fails: malformed or absent fields simply fail each
//! check and the source falls through to "direct".

use backend_traits::{MediaSource, SourceProtocol};

/// Media type of a DASH manifest.
pub const DASH_MANIFEST_MIME: &str = "application/dash+xml";

/// Classify a source as segmented (adaptive manifest) or direct byte stream.
///
/// Checks, in order: the explicit protocol tag, the declared media type
/// (case-insensitive, trimmed), and finally the URL suffix convention
/// (`.mpd` at the end, or `.mpd?` anywhere for URLs carrying a query).
pub fn is_segmented_protocol(source: &MediaSource) -> bool {
    if matches!(source.protocol, Some(SourceProtocol::Dash)) {
        return true;
    }

    if let Some(mime_type) = &source.mime_type {
        if mime_type.trim().eq_ignore_ascii_case(DASH_MANIFEST_MIME) {
            return true;
        }
    }

    let url = source.url.trim().to_ascii_lowercase();
    url.ends_with(".mpd") || url.contains(".mpd?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dash_protocol_wins() {
        let source = MediaSource::new("https://server/stream").with_protocol(SourceProtocol::Dash);
        assert!(is_segmented_protocol(&source));
    }

    #[test]
    fn other_protocol_tags_do_not_classify() {
        let source = MediaSource::new("https://server/stream")
            .with_protocol(SourceProtocol::Other("hls".into()));
        assert!(!is_segmented_protocol(&source));
    }

    #[test]
    fn manifest_mime_type_is_case_insensitive_and_trimmed() {
        let source =
            MediaSource::new("https://server/stream").with_mime_type("  Application/DASH+xml ");
        assert!(is_segmented_protocol(&source));
    }

    #[test]
    fn unrelated_mime_type_does_not_classify() {
        let source = MediaSource::new("https://server/stream").with_mime_type("audio/mpeg");
        assert!(!is_segmented_protocol(&source));
    }

    #[test]
    fn mpd_url_suffix_classifies() {
        assert!(is_segmented_protocol(&MediaSource::new(
            "https://server/sessions/s1/stream.mpd"
        )));
        assert!(is_segmented_protocol(&MediaSource::new(
            " https://server/Stream.MPD "
        )));
    }

    #[test]
    fn mpd_with_query_classifies() {
        assert!(is_segmented_protocol(&MediaSource::new(
            "https://server/stream.mpd?token=abc"
        )));
    }

    #[test]
    fn plain_stream_urls_are_direct() {
        assert!(!is_segmented_protocol(&MediaSource::new(
            "https://server/track.mp3"
        )));
        assert!(!is_segmented_protocol(&MediaSource::new(
            "https://server/download?name=a.mpd.txt"
        )));
        assert!(!is_segmented_protocol(&MediaSource::new("")));
    }
}
