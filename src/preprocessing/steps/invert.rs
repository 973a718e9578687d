use crate::error::CodeshotError;
use image::{Rgba, RgbaImage};
use imageproc::map::map_colors;

/// Photographic negative of the color channels
/// Turns light-on-dark editor themes into dark-on-light text
pub fn apply(image: RgbaImage) -> Result<RgbaImage, CodeshotError> {
    Ok(map_colors(&image, |Rgba([r, g, b, a])| {
        Rgba([255 - r, 255 - g, 255 - b, a])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_flips_colors_not_alpha() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([0, 100, 255, 42]));
        let result = apply(img).unwrap();
        assert!(result.pixels().all(|p| p.0 == [255, 155, 0, 42]));
    }

    #[test]
    fn test_double_invert_restores_image() {
        let img = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8 * 30, y as u8 * 30, 7, 255]));
        let result = apply(apply(img.clone()).unwrap()).unwrap();
        assert_eq!(result, img);
    }
}
