//! OCR engine implementations
//!
//! Engines are conditionally compiled based on feature flags.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::CodeshotError;
use std::sync::Arc;

/// Load the OCR engine selected at build time
///
/// Returns `Ok(None)` when OCR is disabled in `config`.
pub fn load(config: &Config) -> Result<Option<Arc<dyn OcrEngine>>, CodeshotError> {
    if !config.ocr_enabled {
        tracing::info!("OCR disabled, /extract will be unavailable");
        return Ok(None);
    }

    #[cfg(feature = "engine-ocrs")]
    {
        tracing::info!("Initializing ocrs engine...");
        let engine = ocrs::OcrsEngine::new(config)?;
        return Ok(Some(Arc::new(engine)));
    }

    #[cfg(not(feature = "engine-ocrs"))]
    {
        return Err(CodeshotError::InitializationError(
            "No OCR engine compiled in. Build with --features engine-ocrs or pass --no-ocr"
                .to_string(),
        ));
    }
}
