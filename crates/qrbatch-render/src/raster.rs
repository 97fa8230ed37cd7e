use image::{GrayImage, Luma};

use crate::matrix::QrMatrix;

/// Quiet zone width in modules (ISO/IEC 18004 minimum).
pub const DEFAULT_QUIET_ZONE: u32 = 4;

/// Edge length in pixels of one rendered module.
pub const DEFAULT_MODULE_PIXELS: u32 = 64;

const WHITE: u8 = 255;
const BLACK: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// Blank modules added on every side.
    pub quiet_zone: u32,
    /// Pixels per module edge.
    pub module_pixels: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            quiet_zone: DEFAULT_QUIET_ZONE,
            module_pixels: DEFAULT_MODULE_PIXELS,
        }
    }
}

/// Canvas edge length in pixels: `(modules + 2 * quiet_zone) * module_pixels`.
pub fn canvas_size(modules: usize, options: &RasterOptions) -> u32 {
    (modules as u32 + 2 * options.quiet_zone) * options.module_pixels
}

/// Paints the matrix onto a white canvas, one solid black block per dark module.
pub fn rasterize(matrix: &QrMatrix, options: &RasterOptions) -> GrayImage {
    let side = canvas_size(matrix.size(), options);
    let scale = options.module_pixels as usize;
    let offset = (options.quiet_zone * options.module_pixels) as usize;
    let width = side as usize;

    let mut canvas = GrayImage::from_pixel(side, side, Luma([WHITE]));
    let pixels: &mut [u8] = &mut canvas;
    for (y, row) in matrix.rows().enumerate() {
        let top = offset + y * scale;
        for (x, _) in row.iter().enumerate().filter(|(_, dark)| **dark) {
            let left = offset + x * scale;
            for py in top..top + scale {
                let start = py * width + left;
                pixels[start..start + scale].fill(BLACK);
            }
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::encode_matrix;
    use proptest::prelude::*;

    fn small_options() -> RasterOptions {
        RasterOptions {
            quiet_zone: 4,
            module_pixels: 3,
        }
    }

    #[test]
    fn canvas_size_formula() {
        assert_eq!(canvas_size(21, &RasterOptions::default()), (21 + 8) * 64);
        assert_eq!(canvas_size(21, &small_options()), 29 * 3);
    }

    #[test]
    fn default_scale_renders_blocks_of_64() {
        let matrix = encode_matrix("HELLO").expect("encode");
        let image = rasterize(&matrix, &RasterOptions::default());
        assert_eq!(image.width(), 1856);
        assert_eq!(image.height(), 1856);

        // Top-left finder module spans pixels 256..320 on both axes.
        for y in 256..320 {
            for x in 256..320 {
                assert_eq!(image.get_pixel(x, y).0[0], BLACK);
            }
        }
        assert_eq!(image.get_pixel(255, 256).0[0], WHITE);
        assert_eq!(image.get_pixel(256, 255).0[0], WHITE);
    }

    #[test]
    fn quiet_zone_is_white() {
        let matrix = encode_matrix("quiet zone").expect("encode");
        let options = small_options();
        let image = rasterize(&matrix, &options);
        let border = options.quiet_zone * options.module_pixels;
        let side = image.width();
        for (x, y, pixel) in image.enumerate_pixels() {
            let in_border =
                x < border || y < border || x >= side - border || y >= side - border;
            if in_border {
                assert_eq!(pixel.0[0], WHITE, "pixel ({x}, {y}) in quiet zone");
            }
        }
    }

    #[test]
    fn pixels_mirror_modules() {
        let matrix = encode_matrix("https://example.com/kartu/123").expect("encode");
        let options = small_options();
        let image = rasterize(&matrix, &options);
        let scale = options.module_pixels;
        for y in 0..matrix.size() {
            for x in 0..matrix.size() {
                let px = (x as u32 + options.quiet_zone) * scale + scale / 2;
                let py = (y as u32 + options.quiet_zone) * scale + scale / 2;
                let expected = if matrix.is_dark(x, y) { BLACK } else { WHITE };
                assert_eq!(image.get_pixel(px, py).0[0], expected);
            }
        }
        let black = image.pixels().filter(|p| p.0[0] == BLACK).count();
        assert_eq!(black, matrix.dark_count() * (scale * scale) as usize);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn only_pure_black_or_white(payload in "[ -~]{1,120}") {
            let matrix = encode_matrix(&payload).expect("printable ASCII fits");
            let image = rasterize(&matrix, &small_options());
            prop_assert!(image.pixels().all(|p| p.0[0] == BLACK || p.0[0] == WHITE));
        }
    }
}
