//! Screenshot to source code: enhance, recognize, classify

use crate::detection::{classify, Classification};
use crate::engine::OcrEngine;
use crate::error::CodeshotError;
use crate::preprocessing::{EnhancementSettings, Pipeline, StepTiming};
use image::RgbaImage;
use serde::Serialize;
use std::time::Instant;

/// Everything learned from one screenshot
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub text: String,
    pub language: &'static str,
    pub language_name: String,
    pub score: u32,
    pub engine: &'static str,
    pub enhancement_ms: u64,
    pub ocr_ms: u64,
    pub steps: Vec<StepTiming>,
    pub warnings: Vec<String>,
}

/// Run the full pipeline on one image
pub fn extract(
    engine: &dyn OcrEngine,
    image: &RgbaImage,
    settings: &EnhancementSettings,
) -> Result<Extraction, CodeshotError> {
    let enhanced = Pipeline::new(*settings)?.process(image)?;

    let ocr_start = Instant::now();
    let ocr = engine.recognize(&enhanced.image)?;
    let ocr_ms = ocr_start.elapsed().as_millis() as u64;

    let Classification {
        language,
        name,
        score,
    } = classify(&ocr.text);

    tracing::info!(
        engine = engine.name(),
        language,
        score,
        chars = ocr.text.len(),
        enhancement_ms = enhanced.total_time_ms,
        ocr_ms,
        "extraction complete"
    );

    Ok(Extraction {
        text: ocr.text,
        language,
        language_name: name,
        score,
        engine: engine.name(),
        enhancement_ms: enhanced.total_time_ms,
        ocr_ms,
        steps: enhanced.steps,
        warnings: ocr.warnings,
    })
}
