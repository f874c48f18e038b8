//! High-level image operations.
//!
//! These functions turn an [`ImageAsset`] plus configuration into backend
//! parameters and run them.

use super::backend::{BackendError, ConvertOutcome, ImageBackend};
use super::params::{ConvertParams, Method, Quality};
use crate::config::ImagesConfig;
use crate::types::ImageAsset;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Encoding settings for the primary and preview variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    pub quality: Quality,
    pub lowres_quality: Quality,
    pub method: Method,
    pub lowres_scale: f64,
}

impl ConversionConfig {
    pub fn from_images_config(config: &ImagesConfig) -> Self {
        Self {
            quality: Quality::new(config.quality),
            lowres_quality: Quality::new(config.lowres_quality),
            method: Method::new(config.method),
            lowres_scale: config.lowres_scale,
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::from_images_config(&ImagesConfig::default())
    }
}

/// Plan a conversion without executing it.
pub fn plan_conversion(asset: &ImageAsset, config: &ConversionConfig) -> ConvertParams {
    ConvertParams {
        source: asset.source.clone(),
        primary: asset.primary.clone(),
        lowres: asset.lowres.clone(),
        quality: config.quality,
        lowres_quality: config.lowres_quality,
        method: config.method,
        lowres_scale: config.lowres_scale,
    }
}

/// Convert one asset into its primary and preview variants.
pub fn convert_asset(
    backend: &impl ImageBackend,
    asset: &ImageAsset,
    config: &ConversionConfig,
) -> Result<ConvertOutcome> {
    backend.convert(&plan_conversion(asset, config))
}
