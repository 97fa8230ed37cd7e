//! Lossless PNG output.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, GrayImage, ImageEncoder};
use tracing::trace;

use crate::error::{RenderError, Result};

/// Writes an 8-bit grayscale PNG at maximum compression.
///
/// The image is encoded into a uniquely named temporary file beside `path`
/// and moved into place once complete, so `path` either holds a whole image
/// or does not exist. Concurrent writers of the same path never share a
/// temporary file.
pub fn write_png(image: &GrayImage, path: &Path) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let io_error = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".qr")
        .suffix(".png.tmp")
        .tempfile_in(parent)
        .map_err(io_error)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        PngEncoder::new_with_quality(&mut writer, CompressionType::Best, FilterType::Adaptive)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::L8,
            )
            .map_err(|source| RenderError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        writer.flush().map_err(io_error)?;
    }
    temp.persist(path).map_err(|err| io_error(err.error))?;
    trace!(width = image.width(), "png written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RasterOptions, encode_matrix, rasterize};

    #[test]
    fn writes_decodable_grayscale_png() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("code.png");
        let matrix = encode_matrix("HELLO").expect("encode");
        let options = RasterOptions {
            quiet_zone: 4,
            module_pixels: 8,
        };
        let image = rasterize(&matrix, &options);

        write_png(&image, &path).expect("write png");

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .expect("list dir")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("code.png")]);
        let decoded = image::open(&path).expect("decode png");
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!(decoded.to_luma8(), image);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent").join("code.png");
        let image = GrayImage::new(4, 4);

        let err = write_png(&image, &path).expect_err("parent missing");
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
