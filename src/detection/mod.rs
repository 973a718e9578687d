//! Source-language detection for recognized text
//!
//! A flat table of weighted regular expressions per language, and one scoring
//! function over it. This is a heuristic: it never fails, and falls back to
//! `plaintext` when nothing matches.

pub mod classifier;
pub mod languages;
pub mod patterns;

pub use classifier::{classify, Classification, Classifier, LanguageScore};
pub use languages::{language_name, PLAINTEXT, SUPPORTED_LANGUAGES};
pub use patterns::{LanguageRules, PatternTable, LANGUAGE_RULES};
