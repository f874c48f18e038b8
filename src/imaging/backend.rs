//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the one operation the normalizer needs:
//! convert. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::ConvertParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// What a successful conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOutcome {
    /// Source (and primary variant) dimensions.
    pub original: Dimensions,
    /// Dimensions of the `_lower` preview.
    pub lowres: Dimensions,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode the source once and write both the primary and the preview variant.
    fn convert(&self, params: &ConvertParams) -> Result<ConvertOutcome, BackendError>;
}
