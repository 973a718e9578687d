use crate::error::CodeshotError;
use image::{Rgba, RgbaImage};
use imageproc::map::map_colors;

/// Replace R, G and B with ITU-R BT.601 luma, keeping alpha
pub fn apply(image: RgbaImage) -> Result<RgbaImage, CodeshotError> {
    Ok(map_colors(&image, |Rgba([r, g, b, a])| {
        let y = luma(r, g, b);
        Rgba([y, y, y, a])
    }))
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    super::clamp_channel(y)
}
