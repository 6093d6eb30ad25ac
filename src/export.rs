//! PNG export of a rendered framebuffer.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::path::Path;

use canvas::render::Framebuffer;
use image::{ImageFormat, RgbaImage};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("framebuffer does not hold {width}x{height} RGBA pixels")]
    BufferSize { width: u32, height: u32 },
    #[error("image encode failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Convert a framebuffer into an `image` buffer.
///
/// # Errors
///
/// Returns [`ExportError::BufferSize`] if the byte length does not match the
/// framebuffer's dimensions.
pub fn to_image(framebuffer: Framebuffer) -> Result<RgbaImage, ExportError> {
    let (width, height) = (framebuffer.width(), framebuffer.height());
    RgbaImage::from_raw(width, height, framebuffer.into_raw()).ok_or(ExportError::BufferSize { width, height })
}

/// Write `framebuffer` to `path` as PNG, whatever the extension says.
///
/// # Errors
///
/// Returns an error if the buffer is malformed or the file cannot be written.
pub fn write_png(framebuffer: Framebuffer, path: &Path) -> Result<(), ExportError> {
    to_image(framebuffer)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
