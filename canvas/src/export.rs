//! PNG export of the composed surface.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::io::Cursor;

use image::ImageFormat;

use crate::render::Frame;
use crate::scene::Stage;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export: canvas is {stage:?}, both layers must be ready")]
    NotComposed { stage: Stage },
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
}

/// A finished export, ready to hand to the user as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Encode a frame as PNG.
///
/// # Errors
///
/// Returns the encoder's error unchanged.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    frame.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
