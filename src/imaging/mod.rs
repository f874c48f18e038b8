//! Image conversion.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode + flatten** | `image` decoders, `to_rgb8` |
//! | **Preview resample** | Lanczos3 |
//! | **Encode** | libwebp via `webp`, lossy |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining configuration + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ConvertOutcome, Dimensions, ImageBackend};
pub use calculations::scaled_dimensions;
pub use operations::{ConversionConfig, convert_asset, plan_conversion};
pub use params::{ConvertParams, Method, Quality};
pub use rust_backend::RustBackend;
