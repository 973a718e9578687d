//! Code screenshot processing
//!
//! Two pure stages bracket an external OCR engine:
//!
//! - [`preprocessing`] enhances a raster image for recognition
//! - [`detection`] guesses the programming language of the recognized text
//!
//! [`server`] exposes both (plus the full [`extract`] flow) over HTTP.

pub mod config;
pub mod detection;
pub mod engine;
pub mod engines;
pub mod error;
pub mod extract;
pub mod preprocessing;
pub mod server;

pub use detection::{classify, Classification};
pub use error::CodeshotError;
pub use preprocessing::{enhance, EnhancementSettings, Preset};
