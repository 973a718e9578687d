use super::settings::EnhancementSettings;
use super::steps;
use crate::error::CodeshotError;
use image::RgbaImage;
use serde::Serialize;
use std::time::Instant;

/// Timing information for a single enhancement step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of enhancement including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct EnhancementResult {
    /// Enhanced image (not serialized)
    #[serde(skip)]
    pub image: RgbaImage,
    /// Total enhancement time in milliseconds
    pub total_time_ms: u64,
    /// Settings that were applied
    pub settings: EnhancementSettings,
    /// Individual step timings, in execution order
    pub steps: Vec<StepTiming>,
}

/// Enhancement pipeline that applies one settings record
///
/// Stage order is fixed: resize, grayscale, brightness/contrast, threshold,
/// invert, sharpen. Threshold is the terminal contrast step, so invert and
/// sharpen see a two-level image when it is enabled.
pub struct Pipeline {
    settings: EnhancementSettings,
}

impl Pipeline {
    /// Validates `settings` up front so that no step can see an out-of-range value
    pub fn new(settings: EnhancementSettings) -> Result<Self, CodeshotError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &EnhancementSettings {
        &self.settings
    }

    /// Enhance a copy of `image`; the caller's buffer is never touched
    pub fn process(&self, image: &RgbaImage) -> Result<EnhancementResult, CodeshotError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();
        let s = self.settings;

        if image.width() == 0 || image.height() == 0 {
            return Err(CodeshotError::InvalidInput(
                "image must have at least one pixel".to_string(),
            ));
        }

        let mut img = self.run_step("resize", image.clone(), &mut steps_timing, |img| {
            steps::resize::apply(img, s.scale)
        })?;

        if s.grayscale {
            img = self.run_step("grayscale", img, &mut steps_timing, steps::grayscale::apply)?;
        }

        if s.brightness != 0 || s.contrast != 0 {
            img = self.run_step("brightness_contrast", img, &mut steps_timing, |img| {
                steps::brightness_contrast::apply(img, s.brightness, s.contrast)
            })?;
        }

        if s.threshold > 0 {
            img = self.run_step("threshold", img, &mut steps_timing, |img| {
                steps::threshold::apply(img, s.threshold)
            })?;
        }

        if s.invert {
            img = self.run_step("invert", img, &mut steps_timing, steps::invert::apply)?;
        }

        if s.sharpness > 0 {
            img = self.run_step("sharpen", img, &mut steps_timing, |img| {
                steps::sharpen::apply(img, s.sharpness)
            })?;
        }

        Ok(EnhancementResult {
            image: img,
            total_time_ms: start.elapsed().as_millis() as u64,
            settings: s,
            steps: steps_timing,
        })
    }

    fn run_step<F>(
        &self,
        name: &str,
        img: RgbaImage,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<RgbaImage, CodeshotError>
    where
        F: FnOnce(RgbaImage) -> Result<RgbaImage, CodeshotError>,
    {
        let step_start = Instant::now();
        let result = step_fn(img)?;
        let time_ms = step_start.elapsed().as_millis() as u64;
        tracing::debug!(step = name, time_ms, "enhancement step done");
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms,
        });
        Ok(result)
    }
}

/// Apply `settings` to `image` and return the enhanced buffer
pub fn enhance(
    image: &RgbaImage,
    settings: &EnhancementSettings,
) -> Result<RgbaImage, CodeshotError> {
    Ok(Pipeline::new(*settings)?.process(image)?.image)
}
