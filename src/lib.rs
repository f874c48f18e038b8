//! # Recipe Tools
//!
//! Maintenance tools for a static recipe site. The site lives in a `docs/`
//! tree that is served as-is:
//!
//! ```text
//! docs/
//! ├── config.toml          # optional, see `recipe-tools gen-config`
//! ├── index.json           # generated by the Index Builder
//! ├── app.js               # front end, reads index.json
//! ├── images/              # recipe photos
//! └── recipes/             # one JSON document per recipe
//! ```
//!
//! # Two Independent Pipelines
//!
//! ```text
//! images   docs/images/*.{jpg,png,...}  →  *.webp + *_lower.webp, references rewritten
//! index    docs/recipes/*.json          →  docs/index.json
//! ```
//!
//! Both are one-shot, sequential batch jobs. They share configuration and
//! console output but no runtime state, and `build` simply runs one after the
//! other. Per-file problems (a corrupt photo, a malformed recipe) are reported
//! and skipped; only structural problems abort a run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`normalize`] | Image Normalizer: convert, skip converted, remove originals |
//! | [`references`] | Rewrites old image extensions in documents after conversion |
//! | [`imaging`] | Decode, flatten to RGB, resample, encode WebP |
//! | [`vcs`] | Best-effort `git rm` of removed originals |
//! | [`index`] | Index Builder: recipes → sorted `index.json` |
//! | [`recipe`] | Recipe document model (title and ingredient shapes) |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | Output naming (`.webp`, `_lower.webp`) and extension matching |
//! | [`types`] | [`types::ImageAsset`], a source image and its derived outputs |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Outputs Next to Sources
//!
//! `cake.jpg` becomes `cake.webp` and `cake_lower.webp` in the same directory.
//! Recipes reference images by path, so keeping the directory means only the
//! extension in those references has to change, which is exactly what the
//! reference rewriter does. The front end finds the preview by swapping
//! `.webp` for `_lower.webp`.
//!
//! ## Existence Is the Cache
//!
//! An image whose two outputs exist is not converted again. There is no
//! manifest or hash store to get out of sync; deleting a `.webp` is enough to
//! force a re-encode.
//!
//! ## Shapes Resolved at the Boundary
//!
//! Recipe titles and ingredient lists each come in two shapes. They are turned
//! into enum variants once, in [`recipe`], so the index code never branches
//! on raw JSON.

pub mod config;
pub mod imaging;
pub mod index;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod recipe;
pub mod references;
pub mod types;
pub mod vcs;

#[cfg(test)]
pub(crate) mod test_helpers;
