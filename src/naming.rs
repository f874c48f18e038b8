//! File naming conventions shared by both pipelines.
//!
//! Every converted image produces two siblings of the source file:
//!
//! ```text
//! images/cake.jpg   →  images/cake.webp        (primary)
//!                      images/cake_lower.webp  (half-scale preview)
//! ```
//!
//! The site front end derives the preview URL by swapping `.webp` for
//! `_lower.webp`, so both names are fixed.
//!
//! Extension sets in the config are written either as `jpg` or `.jpg`, in any
//! case. [`normalize_extension`] maps both to `jpg`.

use std::path::Path;

/// Extension of every generated image.
pub const WEBP_EXTENSION: &str = "webp";

/// Marker appended to the stem of the preview variant.
pub const LOWRES_SUFFIX: &str = "_lower";

/// Lowercase an extension and strip any leading dot.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Whether `path` has an extension in `extensions` (case-insensitive).
pub fn has_extension_in<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|candidate| normalize_extension(candidate.as_ref()).eq_ignore_ascii_case(ext))
}
