use crate::preprocessing::Preset;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_file_size: usize,
    /// Preset applied when a request names neither a preset nor explicit settings
    pub default_preset: Preset,
    /// Skip loading the OCR engine; `/extract` then answers 503
    pub ocr_enabled: bool,
    /// Where OCR models are cached (platform cache dir when unset)
    pub model_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9393,
            max_file_size: 20 * 1024 * 1024,
            default_preset: Preset::Default,
            ocr_enabled: true,
            model_dir: None,
        }
    }
}
