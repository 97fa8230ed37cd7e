use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Payload does not fit in any QR version at the highest error-correction level.
    #[error("failed to encode QR ({chars} chars): {source}")]
    Encode {
        chars: usize,
        #[source]
        source: qrcodegen::DataTooLong,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG encode error for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;
