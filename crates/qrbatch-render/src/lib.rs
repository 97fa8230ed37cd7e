//! QR rasterizer.
//!
//! Encodes a payload at the highest error-correction level into a borderless
//! module matrix, then paints it onto a white square canvas with an explicit
//! quiet zone. Every module is a solid block of `module_pixels` pixels, either
//! pure black or pure white; there is no anti-aliasing.

pub mod error;
pub mod matrix;
pub mod png;
pub mod raster;

pub use error::{RenderError, Result};
pub use matrix::{QrMatrix, encode_matrix};
pub use png::write_png;
pub use raster::{
    DEFAULT_MODULE_PIXELS, DEFAULT_QUIET_ZONE, RasterOptions, canvas_size, rasterize,
};

use std::path::Path;

/// Encodes `payload` and writes the rendered PNG to `path`.
pub fn render_to_file(payload: &str, path: &Path, options: &RasterOptions) -> Result<()> {
    let matrix = encode_matrix(payload)?;
    let image = rasterize(&matrix, options);
    write_png(&image, path)
}
