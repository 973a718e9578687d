//! Named enhancement settings for common screenshot problems

use super::settings::EnhancementSettings;
use crate::error::CodeshotError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Preset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// No changes
    #[default]
    Default,
    /// Light text on a dark editor theme
    DarkBackground,
    /// Washed-out captures
    LowContrast,
    /// Small or out-of-focus photos of a screen
    Blurry,
    /// Crisp screenshots that only need a slight edge boost
    Screenshot,
    /// Hard black and white text
    TextOnly,
}

impl Preset {
    /// Catalog order, also the order `/presets` lists them in
    pub const ALL: [Preset; 6] = [
        Preset::Default,
        Preset::DarkBackground,
        Preset::LowContrast,
        Preset::Blurry,
        Preset::Screenshot,
        Preset::TextOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::DarkBackground => "dark-background",
            Self::LowContrast => "low-contrast",
            Self::Blurry => "blurry",
            Self::Screenshot => "screenshot",
            Self::TextOnly => "text-only",
        }
    }

    pub fn settings(&self) -> EnhancementSettings {
        let base = EnhancementSettings::default();
        match self {
            Self::Default => base,
            Self::DarkBackground => EnhancementSettings {
                invert: true,
                contrast: 20,
                ..base
            },
            Self::LowContrast => EnhancementSettings {
                contrast: 40,
                sharpness: 30,
                ..base
            },
            Self::Blurry => EnhancementSettings {
                scale: 2.0,
                sharpness: 50,
                contrast: 20,
                ..base
            },
            Self::Screenshot => EnhancementSettings {
                sharpness: 20,
                ..base
            },
            Self::TextOnly => EnhancementSettings {
                grayscale: true,
                contrast: 30,
                threshold: 128,
                ..base
            },
        }
    }
}

impl FromStr for Preset {
    type Err = CodeshotError;

    /// Accepts `dark-background`, `dark_background` and `darkBackground`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "default" => Ok(Self::Default),
            "darkbackground" => Ok(Self::DarkBackground),
            "lowcontrast" => Ok(Self::LowContrast),
            "blurry" => Ok(Self::Blurry),
            "screenshot" => Ok(Self::Screenshot),
            "textonly" => Ok(Self::TextOnly),
            _ => Err(CodeshotError::Configuration(format!(
                "unknown preset '{}' (expected one of: {})",
                s,
                Preset::ALL.map(|p| p.as_str()).join(", ")
            ))),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
