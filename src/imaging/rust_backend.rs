//! Pure Rust decoding and resampling, libwebp encoding.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, BMP, TIFF, GIF) | `image` crate decoders, format sniffed from content |
//! | Flatten alpha / palette / gray | `DynamicImage::to_rgb8` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → WebP | `webp::Encoder` (libwebp, lossy, explicit quality + method) |
//!
//! The `image` crate only ships a lossless WebP encoder, which is why encoding
//! goes through `webp`.

use super::backend::{BackendError, ConvertOutcome, Dimensions, ImageBackend};
use super::calculations::scaled_dimensions;
use super::params::{ConvertParams, Method, Quality};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage};
use std::path::Path;

/// Production backend built on the `image` and `webp` crates.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Reduce any pixel layout to plain 8-bit RGB.
///
/// The encoder is fed RGB only: alpha is dropped (not composited), palettes
/// and gray are expanded, 16-bit channels are narrowed.
fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

/// Encode as lossy WebP and write to `path`.
fn save_webp(
    img: &RgbImage,
    path: &Path,
    quality: Quality,
    method: Method,
) -> Result<(), BackendError> {
    let mut config = webp::WebPConfig::new().map_err(|_| {
        BackendError::ProcessingFailed("Failed to initialise WebP encoder config".into())
    })?;
    config.quality = quality.value() as f32;
    config.method = method.value() as i32;

    let encoded = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height())
        .encode_advanced(&config)
        .map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "WebP encode failed for {}: {:?}",
                path.display(),
                e
            ))
        })?;
    std::fs::write(path, &*encoded)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn convert(&self, params: &ConvertParams) -> Result<ConvertOutcome, BackendError> {
        let rgb = flatten_to_rgb(load_image(&params.source)?);
        let original = Dimensions {
            width: rgb.width(),
            height: rgb.height(),
        };

        // Checked up front so a too-small source leaves no half-written outputs.
        let (low_w, low_h) =
            scaled_dimensions((original.width, original.height), params.lowres_scale);
        if low_w == 0 || low_h == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "{}x{} is too small for a preview at scale {}",
                original.width, original.height, params.lowres_scale
            )));
        }

        save_webp(&rgb, &params.primary, params.quality, params.method)?;

        let lowres = image::imageops::resize(&rgb, low_w, low_h, FilterType::Lanczos3);
        save_webp(&lowres, &params.lowres, params.lowres_quality, params.method)?;

        Ok(ConvertOutcome {
            original,
            lowres: Dimensions {
                width: low_w,
                height: low_h,
            },
        })
    }
}
