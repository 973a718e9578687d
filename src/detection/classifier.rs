use super::languages::{language_name, PLAINTEXT};
use super::patterns::PatternTable;
use crate::error::CodeshotError;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Weighted score of one language against a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageScore {
    pub language: &'static str,
    pub score: u32,
}

/// Winning language for a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub language: &'static str,
    pub name: String,
    pub score: u32,
}

impl Classification {
    fn plaintext() -> Self {
        Self {
            language: PLAINTEXT,
            name: language_name(PLAINTEXT),
            score: 0,
        }
    }

    pub fn is_plaintext(&self) -> bool {
        self.language == PLAINTEXT
    }
}

/// Scores text against a [`PatternTable`]
///
/// A language scores `weight * matches`, where `matches` counts every
/// non-overlapping hit of every one of its patterns. The highest score wins;
/// ties go to the language declared first. Text with no hits at all is
/// `plaintext` with score 0.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: PatternTable,
}

impl Classifier {
    pub fn new(table: PatternTable) -> Self {
        Self { table }
    }

    /// Classifier over the built-in language table
    pub fn builtin() -> Result<Self, CodeshotError> {
        Ok(Self::new(PatternTable::builtin()?))
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Every language with a non-zero score, in table order
    pub fn scores(&self, text: &str) -> Vec<LanguageScore> {
        self.table
            .languages()
            .iter()
            .map(|lang| LanguageScore {
                language: lang.tag,
                score: lang.weight.saturating_mul(lang.match_count(text)),
            })
            .filter(|s| s.score > 0)
            .collect()
    }

    pub fn classify(&self, text: &str) -> Classification {
        let scores = self.scores(text);
        tracing::debug!(?scores, "language scores");

        // First strict maximum in table order, so earlier languages win ties
        let best = scores
            .iter()
            .fold(None::<&LanguageScore>, |best, candidate| match best {
                Some(b) if b.score >= candidate.score => Some(b),
                _ => Some(candidate),
            });

        match best {
            Some(winner) => Classification {
                language: winner.language,
                name: language_name(winner.language),
                score: winner.score,
            },
            None => Classification::plaintext(),
        }
    }
}

static BUILTIN: Lazy<Classifier> = Lazy::new(|| {
    Classifier::builtin().expect("built-in language patterns must compile")
});

/// Classify `text` with the built-in table
pub fn classify(text: &str) -> Classification {
    BUILTIN.classify(text)
}
