use crate::error::CodeshotError;
use image::{Rgba, RgbaImage};
use imageproc::map::map_colors;

/// Global binarization on the mean of R, G and B
///
/// A pixel whose channel average is strictly above `level` becomes white,
/// everything else black. Alpha is untouched. Running it twice with the same
/// level gives the same image as running it once.
pub fn apply(image: RgbaImage, level: u8) -> Result<RgbaImage, CodeshotError> {
    // avg > level  <=>  sum > 3 * level, without leaving integer math
    let cutoff = 3 * level as u16;

    Ok(map_colors(&image, |Rgba([r, g, b, a])| {
        let sum = r as u16 + g as u16 + b as u16;
        let v = if sum > cutoff { 255 } else { 0 };
        Rgba([v, v, v, a])
    }))
}
