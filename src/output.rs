//! CLI output formatting for both pipelines.
//!
//! Paths are shown relative to the docs root so lines stay short and match
//! what appears in recipe documents. Every failure line names the file it
//! concerns.
//!
//! # Output Format
//!
//! ## Images
//!
//! ```text
//! Images in docs/images
//!     images/cake.jpg → cake.webp (1200x800), cake_lower.webp (600x400)
//!     images/cake.jpg: removed (untracked)
//!     images/pie.png: already converted
//!     images/broken.jpg: failed: Processing failed: Failed to decode ...
//! References in docs
//!     recipes/cake.json: updated
//! Processed 2 images (1 converted, 1 skipped), 1 failed
//! Removed 2 originals, updated 1 document
//! ```
//!
//! ## Index
//!
//! ```text
//! Recipes in docs/recipes
//!     apple-pie.json → recipes/apple-pie.json
//!     broken.json: skipped (invalid JSON: EOF while parsing ...)
//! Wrote index.json with 2 recipes, 1 skipped
//! ```
//!
//! # Architecture
//!
//! Each event or summary has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::index::{IndexEvent, IndexSummary};
use crate::normalize::{NormalizeEvent, NormalizeSummary};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// `path` relative to `base` when it lies below it, else as given.
fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `1 image`, `2 images`
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

// ============================================================================
// Image Normalizer output
// ============================================================================

/// Format a single normalizer event as display lines.
///
/// `root` is the docs root; paths below it are shown relative.
pub fn format_normalize_event(event: &NormalizeEvent, root: &Path) -> Vec<String> {
    match event {
        NormalizeEvent::Started { image_root } => {
            vec![format!("Images in {}", image_root.display())]
        }
        NormalizeEvent::Skipped { source } => {
            vec![format!("    {}: already converted", relative(source, root))]
        }
        NormalizeEvent::Converted {
            source,
            primary,
            lowres,
            original,
            lowres_dimensions,
        } => vec![format!(
            "    {} \u{2192} {} ({}x{}), {} ({}x{})",
            relative(source, root),
            file_name(primary),
            original.width,
            original.height,
            file_name(lowres),
            lowres_dimensions.width,
            lowres_dimensions.height,
        )],
        NormalizeEvent::Removed { source, untracked } => {
            let note = if *untracked { " (untracked)" } else { "" };
            vec![format!("    {}: removed{}", relative(source, root), note)]
        }
        NormalizeEvent::Failed { path, error } => {
            vec![format!("    {}: failed: {}", relative(path, root), error)]
        }
        NormalizeEvent::ReferencesStarted { root: scan_root } => {
            vec![format!("References in {}", scan_root.display())]
        }
        NormalizeEvent::ReferencesUpdated { path } => {
            vec![format!("    {}: updated", relative(path, root))]
        }
    }
}

/// Print a normalizer event to stdout.
pub fn print_normalize_event(event: &NormalizeEvent, root: &Path) {
    for line in format_normalize_event(event, root) {
        println!("{}", line);
    }
}

/// Format the closing lines of a normalizer run.
pub fn format_normalize_summary(summary: &NormalizeSummary) -> Vec<String> {
    let mut first = format!(
        "Processed {} ({} converted, {} skipped)",
        count(summary.processed(), "image"),
        summary.converted,
        summary.skipped
    );
    if summary.failed > 0 {
        first.push_str(&format!(", {} failed", summary.failed));
    }

    let mut lines = vec![first];
    if summary.removed > 0 || summary.references_updated > 0 {
        lines.push(format!(
            "Removed {}, updated {}",
            count(summary.removed, "original"),
            count(summary.references_updated, "document")
        ));
    }
    lines
}

pub fn print_normalize_summary(summary: &NormalizeSummary) {
    for line in format_normalize_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Index Builder output
// ============================================================================

/// Format a single index event as display lines.
pub fn format_index_event(event: &IndexEvent) -> Vec<String> {
    match event {
        IndexEvent::Started { recipes_dir } => {
            vec![format!("Recipes in {}", recipes_dir.display())]
        }
        IndexEvent::Added { file, path } => vec![format!("    {} \u{2192} {}", file, path)],
        IndexEvent::Skipped { file, reason } => {
            vec![format!("    {}: skipped ({})", file, reason)]
        }
    }
}

pub fn print_index_event(event: &IndexEvent) {
    for line in format_index_event(event) {
        println!("{}", line);
    }
}

/// Format the closing line of an index run. `root` is the docs root.
pub fn format_index_summary(summary: &IndexSummary, root: &Path) -> Vec<String> {
    let mut line = format!(
        "Wrote {} with {}",
        relative(&summary.output, root),
        count(summary.written, "recipe")
    );
    if summary.skipped > 0 {
        line.push_str(&format!(", {} skipped", summary.skipped));
    }
    vec![line]
}

pub fn print_index_summary(summary: &IndexSummary, root: &Path) {
    for line in format_index_summary(summary, root) {
        println!("{}", line);
    }
}
