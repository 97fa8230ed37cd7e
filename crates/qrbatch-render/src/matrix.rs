use qrcodegen::{QrCode, QrCodeEcc};

use crate::error::{RenderError, Result};

/// Square QR module matrix without any border. `true` is a dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Builds a matrix from row-major modules. Returns `None` unless
    /// `modules.len() == size * size`.
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Option<Self> {
        (modules.len() == size * size).then_some(Self { size, modules })
    }

    /// Modules per side.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.modules[y * self.size + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks(self.size.max(1))
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|dark| **dark).count()
    }
}

/// Encodes `payload` at error-correction level H, choosing the smallest version
/// that fits.
pub fn encode_matrix(payload: &str) -> Result<QrMatrix> {
    let code = QrCode::encode_text(payload, QrCodeEcc::High).map_err(|source| {
        RenderError::Encode {
            chars: payload.chars().count(),
            source,
        }
    })?;
    let size = code.size();
    let modules = (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .map(|(x, y)| code.get_module(x, y))
        .collect();
    Ok(QrMatrix {
        size: size as usize,
        modules,
    })
}
