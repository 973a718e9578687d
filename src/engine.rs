use crate::error::CodeshotError;
use image::RgbaImage;

/// Text recognized from one image
#[derive(Debug, Clone, Default)]
pub struct OcrResult {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Trait that all OCR engines must implement
///
/// Engines are black boxes to the rest of the crate: an enhanced image goes
/// in, raw text comes out.
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize the text in an RGBA image
    fn recognize(&self, image: &RgbaImage) -> Result<OcrResult, CodeshotError>;
}
