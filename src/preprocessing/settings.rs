use crate::error::CodeshotError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = -100..=100;
pub const CONTRAST_RANGE: RangeInclusive<i32> = -100..=100;
pub const SHARPNESS_RANGE: RangeInclusive<u32> = 0..=100;
pub const SCALE_RANGE: RangeInclusive<f32> = 1.0..=4.0;

/// Enhancement parameters for a single pipeline run
///
/// Missing fields deserialize to their neutral value, so a request body of
/// `{"invert": true}` is a complete settings record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementSettings {
    /// Added to every color channel after contrast, -100..=100
    pub brightness: i32,
    /// -100..=100, 0 leaves contrast unchanged
    pub contrast: i32,
    /// Strength of the 3x3 sharpen kernel, 0..=100
    pub sharpness: u32,
    /// Upscale factor, 1.0..=4.0
    pub scale: f32,
    pub grayscale: bool,
    pub invert: bool,
    /// Binarization level, 0 disables
    pub threshold: u8,
}

impl Default for EnhancementSettings {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 0,
            sharpness: 0,
            scale: 1.0,
            grayscale: false,
            invert: false,
            threshold: 0,
        }
    }
}

impl EnhancementSettings {
    /// Check every numeric field against its documented domain
    pub fn validate(&self) -> Result<(), CodeshotError> {
        check_range("brightness", self.brightness, &BRIGHTNESS_RANGE)?;
        check_range("contrast", self.contrast, &CONTRAST_RANGE)?;
        check_range("sharpness", self.sharpness, &SHARPNESS_RANGE)?;

        if !self.scale.is_finite() || !SCALE_RANGE.contains(&self.scale) {
            return Err(CodeshotError::InvalidInput(format!(
                "scale {} outside {:?}",
                self.scale, SCALE_RANGE
            )));
        }

        Ok(())
    }

    /// True when running the pipeline would leave the image untouched
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

fn check_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> Result<(), CodeshotError>
where
    T: PartialOrd + std::fmt::Debug,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CodeshotError::InvalidInput(format!(
            "{} {:?} outside {:?}",
            name, value, range
        )))
    }
}
