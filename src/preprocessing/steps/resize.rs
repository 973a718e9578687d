use crate::error::CodeshotError;
use crate::preprocessing::settings::SCALE_RANGE;
use image::{imageops::FilterType, RgbaImage};

/// Largest edge we are willing to produce
const MAX_DIMENSION: u32 = 16_384;

/// Upscale by `scale` with Lanczos3 resampling
///
/// Target dimensions are `round(width * scale)` x `round(height * scale)`.
/// When those equal the source dimensions the image is returned as-is.
pub fn apply(image: RgbaImage, scale: f32) -> Result<RgbaImage, CodeshotError> {
    if !scale.is_finite() || !SCALE_RANGE.contains(&scale) {
        return Err(CodeshotError::InvalidInput(format!(
            "scale {} outside {:?}",
            scale, SCALE_RANGE
        )));
    }

    let (width, height) = image.dimensions();
    let (new_width, new_height) = scaled_dimensions(width, height, scale);

    if new_width > MAX_DIMENSION || new_height > MAX_DIMENSION {
        return Err(CodeshotError::InvalidInput(format!(
            "scaled size {}x{} exceeds {} pixels per side",
            new_width, new_height, MAX_DIMENSION
        )));
    }

    if (new_width, new_height) == (width, height) {
        return Ok(image);
    }

    Ok(image::imageops::resize(
        &image,
        new_width,
        new_height,
        FilterType::Lanczos3,
    ))
}

pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let w = (width as f64 * scale as f64).round() as u32;
    let h = (height as f64 * scale as f64).round() as u32;
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_resize_upscales_small_image() {
        let img = RgbaImage::new(100, 40);
        let result = apply(img, 2.5).unwrap();
        assert_eq!(result.dimensions(), (250, 100));
    }

    #[test]
    fn test_unit_scale_is_identity() {
        let img = RgbaImage::from_fn(9, 4, |x, y| Rgba([x as u8, y as u8, 3, 255]));
        let result = apply(img.clone(), 1.0).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_rounds_fractional_dimensions() {
        assert_eq!(scaled_dimensions(3, 5, 1.5), (5, 8));
    }

    #[test]
    fn test_rejects_downscale() {
        assert!(matches!(
            apply(RgbaImage::new(10, 10), 0.5),
            Err(CodeshotError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_solid_color_survives_resampling() {
        let img = RgbaImage::from_pixel(5, 5, Rgba([30, 60, 90, 255]));
        let result = apply(img, 2.0).unwrap();
        for p in result.pixels() {
            for (got, want) in p.0.iter().zip([30u8, 60, 90, 255]) {
                assert!(got.abs_diff(want) <= 1, "{:?}", p);
            }
        }
    }
}
