//! Rewriting image references after conversion.
//!
//! Once `cake.jpg` has become `cake.webp`, every recipe, page and script that
//! mentions `cake.jpg` needs the new name. The rewrite is textual: an old
//! extension is replaced only where it ends a token, i.e. when followed by a
//! quote, whitespace, a comma, a closing brace or the end of the document.
//!
//! ```text
//! "image": "img/cake.JPG",   →   "image": "img/cake.webp",
//! see cake.jpgx              →   unchanged
//! ```

use crate::naming::{has_extension_in, normalize_extension};
use crate::normalize::NormalizeEvent;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Replaces old image extensions with a new one at token boundaries.
#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    /// `None` when no usable old extension was given; rewriting is then a no-op.
    pattern: Option<Regex>,
    replacement: String,
}

impl ReferenceRewriter {
    pub fn new<S: AsRef<str>>(old_extensions: &[S], new_extension: &str) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = old_extensions
            .iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .map(|ext| regex::escape(&ext))
            .collect();

        let pattern = if alternatives.is_empty() {
            None
        } else {
            // The boundary is captured and written back, so it is never consumed.
            Some(Regex::new(&format!(
                r#"(?i)\.(?:{})(['"\s,}}]|$)"#,
                alternatives.join("|")
            ))?)
        };

        let new_extension = normalize_extension(new_extension).replace('$', "$$");
        Ok(Self {
            pattern,
            replacement: format!(".{new_extension}${{1}}"),
        })
    }

    /// Rewrite `text`, borrowing it unchanged when nothing matched.
    pub fn rewrite<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, self.replacement.as_str()),
            None => Cow::Borrowed(text),
        }
    }
}

/// Rewrite references in every matching document under `root`.
///
/// Documents that are not valid UTF-8 are skipped silently. A document is
/// written back only when its content changed. Returns the number of
/// documents updated.
pub fn update_references<S: AsRef<str>>(
    root: &Path,
    file_extensions: &[S],
    rewriter: &ReferenceRewriter,
    on_event: &mut impl FnMut(NormalizeEvent),
) -> usize {
    if !root.is_dir() {
        return 0;
    }

    let mut updated = 0;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                on_event(NormalizeEvent::Failed {
                    path: err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf()),
                    error: err.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension_in(entry.path(), file_extensions) {
            continue;
        }

        match rewrite_file(entry.path(), rewriter) {
            Ok(true) => {
                updated += 1;
                on_event(NormalizeEvent::ReferencesUpdated {
                    path: entry.path().to_path_buf(),
                });
            }
            Ok(false) => {}
            Err(err) => on_event(NormalizeEvent::Failed {
                path: PathBuf::from(entry.path()),
                error: err.to_string(),
            }),
        }
    }
    updated
}

/// Returns `Ok(true)` when the file was rewritten.
fn rewrite_file(path: &Path, rewriter: &ReferenceRewriter) -> io::Result<bool> {
    let bytes = fs::read(path)?;
    let Ok(text) = String::from_utf8(bytes) else {
        return Ok(false);
    };

    match rewriter.rewrite(&text) {
        Cow::Owned(rewritten) if rewritten != text => {
            fs::write(path, rewritten)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
