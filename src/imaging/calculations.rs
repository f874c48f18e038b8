//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scale both dimensions by `scale`, rounding down.
///
/// # Examples
/// ```
/// # use recipe_tools::imaging::scaled_dimensions;
/// assert_eq!(scaled_dimensions((801, 600), 0.5), (400, 300));
/// assert_eq!(scaled_dimensions((1, 1), 0.5), (0, 0));
/// ```
pub fn scaled_dimensions(source: (u32, u32), scale: f64) -> (u32, u32) {
    let (w, h) = source;
    (
        (w as f64 * scale).floor() as u32,
        (h as f64 * scale).floor() as u32,
    )
}
