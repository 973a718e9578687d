use crate::error::CodeshotError;
use crate::preprocessing::settings::SHARPNESS_RANGE;
use image::RgbaImage;
use rayon::prelude::*;

const CHANNELS: usize = 4;

/// Laplacian-style sharpening with adjustable strength
///
/// With `s = amount / 100` the kernel is
///
/// ```text
///  0   -s    0
/// -s  1+4s  -s
///  0   -s    0
/// ```
///
/// applied to R, G and B of interior pixels only. The outer one-pixel border
/// and the alpha channel are copied through unchanged. Rows are convolved in
/// parallel; every row reads from the untouched source and writes into its own
/// slice of the output, so the result does not depend on scheduling.
pub fn apply(image: RgbaImage, amount: u32) -> Result<RgbaImage, CodeshotError> {
    if !SHARPNESS_RANGE.contains(&amount) {
        return Err(CodeshotError::InvalidInput(format!(
            "sharpness {} outside {:?}",
            amount, SHARPNESS_RANGE
        )));
    }

    let (width, height) = image.dimensions();
    if amount == 0 || width < 3 || height < 3 {
        return Ok(image);
    }

    let s = amount as f32 / 100.0;
    let center = 1.0 + 4.0 * s;
    let stride = width as usize * CHANNELS;
    let src = image.as_raw();
    let mut out = src.clone();

    out.par_chunks_mut(stride)
        .enumerate()
        .filter(|(y, _)| *y > 0 && *y < height as usize - 1)
        .for_each(|(y, row)| {
            let above = &src[(y - 1) * stride..y * stride];
            let here = &src[y * stride..(y + 1) * stride];
            let below = &src[(y + 1) * stride..(y + 2) * stride];

            for x in 1..width as usize - 1 {
                let px = x * CHANNELS;
                for c in 0..3 {
                    let i = px + c;
                    let sum = center * here[i] as f32
                        - s * (above[i] as f32
                            + below[i] as f32
                            + here[i - CHANNELS] as f32
                            + here[i + CHANNELS] as f32);
                    row[i] = super::clamp_channel(sum);
                }
            }
        });

    RgbaImage::from_raw(width, height, out).ok_or_else(|| {
        CodeshotError::InvalidInput(format!("sharpened buffer does not fit {}x{}", width, height))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_sharpen_enhances_edges() {
        // Left half dark, right half light
        let img = RgbaImage::from_fn(20, 10, |x, _| {
            if x < 10 {
                Rgba([50, 50, 50, 255])
            } else {
                Rgba([200, 200, 200, 255])
            }
        });

        let result = apply(img, 100).unwrap();

        let edge_left = result.get_pixel(9, 5).0[0];
        let edge_right = result.get_pixel(10, 5).0[0];

        // 5 * 50 - (50 + 50 + 50 + 200) = -100 -> 0, 5 * 200 - (200 * 3 + 50) = 350 -> 255
        assert_eq!(edge_left, 0);
        assert_eq!(edge_right, 255);
    }

    #[test]
    fn test_flat_region_unchanged() {
        let img = RgbaImage::from_pixel(6, 6, Rgba([90, 120, 33, 255]));
        let result = apply(img.clone(), 70).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_border_and_alpha_untouched() {
        let img = RgbaImage::from_fn(7, 5, |x, y| {
            Rgba([(x * 37 % 256) as u8, (y * 53 % 256) as u8, ((x + y) * 19) as u8, (x * 11) as u8])
        });

        let result = apply(img.clone(), 100).unwrap();

        for (x, y, p) in result.enumerate_pixels() {
            let original = img.get_pixel(x, y);
            assert_eq!(p.0[3], original.0[3], "alpha changed at ({}, {})", x, y);
            if x == 0 || y == 0 || x == 6 || y == 4 {
                assert_eq!(p, original, "border changed at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_partial_strength_math() {
        // Center 100 surrounded by 0: (1 + 4 * 0.25) * 100 = 200
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([100, 100, 100, 255]));

        let result = apply(img, 25).unwrap();

        assert_eq!(result.get_pixel(1, 1).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_tiny_images_pass_through() {
        let img = RgbaImage::from_pixel(2, 9, Rgba([1, 2, 3, 4]));
        let result = apply(img.clone(), 100).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_rejects_out_of_range_amount() {
        assert!(apply(RgbaImage::new(3, 3), 101).is_err());
    }
}
