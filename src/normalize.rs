//! Image Normalizer.
//!
//! Walks the image tree under the docs root and turns every supported raster
//! file into a WebP pair:
//!
//! ```text
//! docs/images/
//! ├── cake.jpg          # source, removed afterwards when delete_originals is on
//! ├── cake.webp         # primary variant (quality 80)
//! └── cake_lower.webp   # preview, half size (quality 50)
//! ```
//!
//! An asset whose two outputs already exist is skipped, so repeated runs only
//! convert what is new. Per-file failures are reported as events and never
//! stop the walk. Once all images are handled, references to the old
//! extensions are rewritten across the docs tree (see [`crate::references`]).
//!
//! Progress is reported through a caller-supplied `FnMut(NormalizeEvent)`;
//! the CLI prints each event as it arrives.

use crate::config::ToolsConfig;
use crate::imaging::{ConversionConfig, Dimensions, ImageBackend, RustBackend, convert_asset};
use crate::naming::{WEBP_EXTENSION, normalize_extension};
use crate::references::{ReferenceRewriter, update_references};
use crate::types::ImageAsset;
use crate::vcs::Untracker;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Invalid reference pattern: {0}")]
    References(#[from] regex::Error),
}

/// Progress reported while normalizing.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeEvent {
    Started {
        image_root: PathBuf,
    },
    /// Both outputs already existed.
    Skipped {
        source: PathBuf,
    },
    Converted {
        source: PathBuf,
        primary: PathBuf,
        lowres: PathBuf,
        original: Dimensions,
        lowres_dimensions: Dimensions,
    },
    /// The original was deleted; `untracked` tells whether git accepted the removal.
    Removed {
        source: PathBuf,
        untracked: bool,
    },
    Failed {
        path: PathBuf,
        error: String,
    },
    ReferencesStarted {
        root: PathBuf,
    },
    ReferencesUpdated {
        path: PathBuf,
    },
}

/// Counts for one normalizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub removed: usize,
    pub references_updated: usize,
}

impl NormalizeSummary {
    /// Images that ended the run with both outputs in place.
    pub fn processed(&self) -> usize {
        self.converted + self.skipped
    }
}

/// Normalize images with the production backend.
pub fn normalize(
    root: &Path,
    config: &ToolsConfig,
    untracker: Option<&dyn Untracker>,
    on_event: impl FnMut(NormalizeEvent),
) -> Result<NormalizeSummary, NormalizeError> {
    normalize_images(root, config, &RustBackend::new(), untracker, on_event)
}

/// Normalize images using a specific backend (allows testing with mock).
pub fn normalize_images(
    root: &Path,
    config: &ToolsConfig,
    backend: &impl ImageBackend,
    untracker: Option<&dyn Untracker>,
    mut on_event: impl FnMut(NormalizeEvent),
) -> Result<NormalizeSummary, NormalizeError> {
    // Compiled up front so a bad extension set fails before any file is touched.
    let rewriter = if config.references.enabled {
        Some(ReferenceRewriter::new(
            &config.images.supported_extensions,
            WEBP_EXTENSION,
        )?)
    } else {
        None
    };

    let image_root = root.join(&config.images.root);
    let conversion = ConversionConfig::from_images_config(&config.images);
    let mut summary = NormalizeSummary::default();

    on_event(NormalizeEvent::Started {
        image_root: image_root.clone(),
    });

    for path in image_files(&image_root, &mut on_event, &mut summary) {
        let Some(asset) = ImageAsset::from_path(&path, &config.images.supported_extensions) else {
            continue;
        };
        // A `.webp` source would be its own primary output.
        if normalize_extension(&asset.extension) == WEBP_EXTENSION {
            continue;
        }

        if asset.is_processed() {
            summary.skipped += 1;
            on_event(NormalizeEvent::Skipped {
                source: asset.source.clone(),
            });
        } else {
            match convert_asset(backend, &asset, &conversion) {
                Ok(outcome) => {
                    summary.converted += 1;
                    on_event(NormalizeEvent::Converted {
                        source: asset.source.clone(),
                        primary: asset.primary.clone(),
                        lowres: asset.lowres.clone(),
                        original: outcome.original,
                        lowres_dimensions: outcome.lowres,
                    });
                }
                Err(e) => {
                    summary.failed += 1;
                    on_event(NormalizeEvent::Failed {
                        path: asset.source.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            }
        }

        if config.images.delete_originals {
            remove_original(&asset.source, untracker, &mut on_event, &mut summary);
        }
    }

    if let Some(rewriter) = rewriter {
        on_event(NormalizeEvent::ReferencesStarted {
            root: root.to_path_buf(),
        });
        summary.references_updated = update_references(
            root,
            &config.references.file_extensions,
            &rewriter,
            &mut on_event,
        );
    }

    Ok(summary)
}

/// Collect candidate files under `image_root` in sorted order.
///
/// The listing is taken before any conversion so files created or removed
/// during the run are never revisited. A missing root yields nothing.
fn image_files(
    image_root: &Path,
    on_event: &mut impl FnMut(NormalizeEvent),
    summary: &mut NormalizeSummary,
) -> Vec<PathBuf> {
    if !image_root.is_dir() {
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(image_root).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(err) => {
                summary.failed += 1;
                on_event(NormalizeEvent::Failed {
                    path: err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| image_root.to_path_buf()),
                    error: err.to_string(),
                });
            }
        }
    }
    files
}

/// Best-effort untrack, then delete the source if it is still there.
fn remove_original(
    source: &Path,
    untracker: Option<&dyn Untracker>,
    on_event: &mut impl FnMut(NormalizeEvent),
    summary: &mut NormalizeSummary,
) {
    // git rm deletes the working copy itself when it succeeds.
    let untracked = untracker.is_some_and(|u| u.untrack(source).is_ok());

    if source.exists()
        && let Err(e) = fs::remove_file(source)
    {
        summary.failed += 1;
        on_event(NormalizeEvent::Failed {
            path: source.to_path_buf(),
            error: e.to_string(),
        });
        return;
    }

    summary.removed += 1;
    on_event(NormalizeEvent::Removed {
        source: source.to_path_buf(),
        untracked,
    });
}
