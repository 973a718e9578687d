use crate::error::CodeshotError;
use crate::preprocessing::settings::{BRIGHTNESS_RANGE, CONTRAST_RANGE};
use image::{Rgba, RgbaImage};
use imageproc::map::map_colors;

/// Apply contrast around mid-gray, then add brightness
///
/// The contrast factor is `259 * (c + 255) / (255 * (259 - c))`, which has a
/// pole at `c = 259`; out-of-domain values are rejected instead of producing
/// non-finite channel math.
pub fn apply(image: RgbaImage, brightness: i32, contrast: i32) -> Result<RgbaImage, CodeshotError> {
    if !BRIGHTNESS_RANGE.contains(&brightness) {
        return Err(CodeshotError::InvalidInput(format!(
            "brightness {} outside {:?}",
            brightness, BRIGHTNESS_RANGE
        )));
    }
    if !CONTRAST_RANGE.contains(&contrast) {
        return Err(CodeshotError::InvalidInput(format!(
            "contrast {} outside {:?}",
            contrast, CONTRAST_RANGE
        )));
    }

    let factor = contrast_factor(contrast);
    let offset = 128.0 + brightness as f32;
    let adjust = |v: u8| super::clamp_channel(factor * (v as f32 - 128.0) + offset);

    Ok(map_colors(&image, |Rgba([r, g, b, a])| {
        Rgba([adjust(r), adjust(g), adjust(b), a])
    }))
}

pub(crate) fn contrast_factor(contrast: i32) -> f32 {
    let c = contrast as f32;
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_contrast_factor_is_one() {
        assert!((contrast_factor(0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_brightness_only_shifts_channels() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([100, 150, 250, 9]));
        let result = apply(img, 10, 0).unwrap();
        assert_eq!(result.get_pixel(0, 0).0, [110, 160, 255, 9]);
    }

    #[test]
    fn test_contrast_pushes_away_from_midpoint() {
        // factor(20) = 259 * 275 / (255 * 239) ~= 1.16868
        let img = RgbaImage::from_pixel(1, 1, Rgba([100, 128, 200, 255]));
        let result = apply(img, 0, 20).unwrap();
        // 1.16868 * -28 + 128 = 95.28, 1.16868 * 72 + 128 = 212.14
        assert_eq!(result.get_pixel(0, 0).0, [95, 128, 212, 255]);
    }

    #[test]
    fn test_negative_contrast_flattens() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 128, 255]));
        let result = apply(img, 0, -100).unwrap();
        let [r, g, b, _] = result.get_pixel(0, 0).0;
        assert!(r > 0 && r < 128);
        assert!(g > 128 && g < 255);
        assert_eq!(b, 128);
    }

    #[test]
    fn test_rejects_contrast_at_pole() {
        let img = RgbaImage::new(1, 1);
        assert!(matches!(
            apply(img, 0, 259),
            Err(CodeshotError::InvalidInput(_))
        ));
    }
}
