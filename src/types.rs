//! Shared types used by the image pipeline stages.

use crate::naming::{LOWRES_SUFFIX, WEBP_EXTENSION, has_extension_in};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A source raster image and the two WebP files derived from it.
///
/// Both outputs are siblings of the source and share its stem:
/// `photos/cake.PNG` → `photos/cake.webp` + `photos/cake_lower.webp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub source: PathBuf,
    /// File stem, lossily converted for display.
    pub stem: String,
    /// Source extension as found on disk (case preserved).
    pub extension: String,
    pub primary: PathBuf,
    pub lowres: PathBuf,
}

impl ImageAsset {
    /// Build an asset for `path` if its extension is in `supported`.
    pub fn from_path<S: AsRef<str>>(path: &Path, supported: &[S]) -> Option<Self> {
        if !has_extension_in(path, supported) {
            return None;
        }
        let stem = path.file_stem()?;
        let extension = path.extension()?.to_string_lossy().into_owned();

        let mut lowres_name = OsString::from(stem);
        lowres_name.push(format!("{LOWRES_SUFFIX}.{WEBP_EXTENSION}"));

        Some(Self {
            source: path.to_path_buf(),
            stem: stem.to_string_lossy().into_owned(),
            extension,
            primary: path.with_extension(WEBP_EXTENSION),
            lowres: path.with_file_name(lowres_name),
        })
    }

    /// Both derived outputs exist, so converting again would be a no-op.
    pub fn is_processed(&self) -> bool {
        self.primary.exists() && self.lowres.exists()
    }
}
