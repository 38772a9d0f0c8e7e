#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Small helpers for reading names out of `$ref` strings.

use percent_encoding::percent_decode_str;

/// Extracts the simple name from a reference string (its final segment).
/// e.g. `#/components/schemas/User` -> `User`
///
/// Returns `None` for an empty final segment.
pub fn extract_ref_name(ref_loc: &str) -> Option<String> {
    let last = ref_loc.rsplit('/').next()?;
    let name = decode_pointer_segment(last);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Extracts a component name from a local `$ref` pointing to `#/components/{section}/{name}`.
///
/// Returns `None` if the reference is not local to the current document.
pub(crate) fn extract_component_name(ref_str: &str, section: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix("#/")?;
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 || segments[0] != "components" || segments[1] != section {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent encoding).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
