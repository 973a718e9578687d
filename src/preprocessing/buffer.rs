//! RGBA buffer construction, decoding and encoding
//!
//! Every enhancement step works on an [`RgbaImage`]: four 8-bit channels per
//! pixel, row-major, origin top-left. The helpers here are the only places a
//! buffer enters or leaves that representation.

use crate::error::CodeshotError;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Build an RGBA buffer from raw bytes, enforcing `width * height * 4 == len`
pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<RgbaImage, CodeshotError> {
    if width == 0 || height == 0 {
        return Err(CodeshotError::InvalidInput(format!(
            "image must have at least one pixel, got {}x{}",
            width, height
        )));
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| {
            CodeshotError::InvalidInput(format!("dimensions {}x{} overflow", width, height))
        })?;

    if data.len() != expected {
        return Err(CodeshotError::InvalidInput(format!(
            "buffer length {} does not match {}x{} RGBA ({} bytes)",
            data.len(),
            width,
            height,
            expected
        )));
    }

    RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        CodeshotError::InvalidInput(format!("buffer does not fit {}x{}", width, height))
    })
}

/// Decode any supported raster format (PNG, JPEG, GIF, BMP, WebP, TIFF) to RGBA
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, CodeshotError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| CodeshotError::DecodeError(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(CodeshotError::InvalidInput(
            "decoded image has no pixels".to_string(),
        ));
    }

    Ok(img.into_rgba8())
}

/// Encode an RGBA buffer as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CodeshotError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| CodeshotError::EncodeError(e.to_string()))?;
    Ok(out.into_inner())
}
