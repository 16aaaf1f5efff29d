//! Optional header logo. A logo that cannot be read is skipped, never fatal.

use std::path::Path;

use image::{ImageError, ImageFormat};
use tracing::warn;

/// A decoded PNG image with its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl Logo {
    /// Decode `bytes` as a PNG. Truncated or corrupt data is an error even
    /// when the header looks valid, since the document only embeds PNGs.
    pub fn from_png(bytes: Vec<u8>) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)?;
        Ok(Self {
            width_px: decoded.width(),
            height_px: decoded.height(),
            bytes,
        })
    }
}

/// Load the logo at `path`, logging and returning `None` on any failure.
pub fn load_logo(path: &Path) -> Option<Logo> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "logo load failed, exporting without it");
            return None;
        }
    };
    match Logo::from_png(bytes) {
        Ok(logo) => Some(logo),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "logo is not a readable PNG, exporting without it");
            None
        }
    }
}
