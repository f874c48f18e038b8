//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what files to create) and the [`backend`](super::backend)
//! (which does the pixel work), so tests can swap in a mock backend without
//! touching operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: lossy encoding quality (0–100). Clamped on construction.
//! - [`Method`]: WebP encoder effort (0–6). Clamped on construction.
//! - [`ConvertParams`]: full specification of one source → primary + preview conversion.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// WebP encoder effort: 0 is fastest, 6 gives the smallest output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Method(pub u32);

impl Method {
    pub const MAX: u32 = 6;

    pub fn new(value: u32) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Method {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

/// Parameters for converting one source image into its two WebP variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub primary: PathBuf,
    pub lowres: PathBuf,
    pub quality: Quality,
    pub lowres_quality: Quality,
    pub method: Method,
    /// Factor applied to both source dimensions for the preview.
    pub lowres_scale: f64,
}
