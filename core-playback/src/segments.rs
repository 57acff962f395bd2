//! Recovery of the adaptive-bitrate representation id from segment URIs.
//!
//! The segmented backend attributes each segment fetch outcome to the quality
//! rung it belongs to, and the segment naming convention is the only channel
//! carrying that association at fetch time. Two asset shapes are recognized:
//!
//! - media segment: `chunk-<rep>-<sequence>.<ext>`
//! - init segment:  `init-<rep>.<ext>`
//!
//! where `<ext>` is `m4s` or `webm` (case-insensitive) and `<rep>` may itself
//! contain hyphens — the last `-<digits>` before the extension is always
//! treated as the sequence number.
//!
//! All functions return `None` for anything that does not match; they never
//! panic. A `None` means "unattributable", not an error.

/// Extract the asset (file) name from a request URI.
///
/// Strips any query string or fragment, then takes the path component after
/// the final `/`. Returns `None` for empty input or a URI ending in `/`.
pub fn asset_name_from_uri(uri: &str) -> Option<&str> {
    let uri = uri.trim();
    if uri.is_empty() {
        return None;
    }

    let path = match uri.find(['?', '#']) {
        Some(idx) => &uri[..idx],
        None => uri,
    };

    let name = match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    };

    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Recover the representation id from a segment or init-segment asset name.
pub fn representation_id_from_asset_name(name: &str) -> Option<&str> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let stem = strip_segment_extension(name)?;

    if let Some(rest) = stem.strip_prefix("chunk-") {
        // The sequence number is the final hyphen-delimited run of digits;
        // everything before it belongs to the representation id.
        let (rep, sequence) = rest.rsplit_once('-')?;
        if rep.is_empty() || sequence.is_empty() {
            return None;
        }
        if !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return Some(rep);
    }

    if let Some(rep) = stem.strip_prefix("init-") {
        if rep.is_empty() {
            return None;
        }
        return Some(rep);
    }

    None
}

/// Recover the representation id straight from a segment request URI.
pub fn representation_id_from_uri(uri: &str) -> Option<&str> {
    asset_name_from_uri(uri).and_then(representation_id_from_asset_name)
}

/// Split off a recognized segment extension, returning the stem.
fn strip_segment_extension(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    if ext.eq_ignore_ascii_case("m4s") || ext.eq_ignore_ascii_case("webm") {
        Some(stem)
    } else {
        None
    }
}
