//! Shared test utilities.
//!
//! Synthetic images are generated on the fly with the `image` crate, so no
//! binary fixtures live in the repository. The recipe fixture site under
//! `fixtures/docs/` is copied into a temp directory per test.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! create_test_jpeg(&tmp.path().join("images/cake.jpg"), 64, 48);
//! write_recipe(tmp.path(), "cake.json", &serde_json::json!({"title": "Cake"}));
//! ```

use image::{ImageEncoder, RgbImage, RgbaImage};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/docs/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/docs");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `recipe` as `<root>/recipes/<file>`.
pub fn write_recipe(root: &Path, file: &str, recipe: &Value) {
    let dir = root.join("recipes");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), serde_json::to_string_pretty(recipe).unwrap()).unwrap();
}

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a gradient RGB JPEG.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a test image in the format implied by the extension.
///
/// Formats that carry alpha get a half-transparent RGBA image so the flatten
/// step is exercised; JPEG falls back to RGB.
pub fn create_test_image(path: &Path, width: u32, height: u32) {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if ext == "jpg" || ext == "jpeg" {
        create_test_jpeg(path, width, height);
        return;
    }
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, 64, (y % 256) as u8, 128])
    });
    img.save(path).unwrap();
}
