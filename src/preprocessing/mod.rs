//! Image enhancement for OCR
//!
//! Turns a raw screenshot into an image the OCR engine reads more reliably:
//! upscaling, grayscale, brightness/contrast, binarization, inversion and
//! sharpening, always applied in that order.

pub mod buffer;
pub mod pipeline;
pub mod presets;
pub mod settings;
pub mod steps;

pub use pipeline::{enhance, EnhancementResult, Pipeline, StepTiming};
pub use presets::Preset;
pub use settings::EnhancementSettings;
