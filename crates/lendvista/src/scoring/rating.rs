use std::fmt;

use serde::{Deserialize, Serialize};

use super::CreditScore;

/// Qualitative band shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreRating {
    NeedsWork,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreRating {
    pub fn from_score(score: CreditScore) -> Self {
        match score.value() {
            750.. => ScoreRating::Excellent,
            670..=749 => ScoreRating::Good,
            580..=669 => ScoreRating::Fair,
            450..=579 => ScoreRating::Poor,
            _ => ScoreRating::NeedsWork,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Excellent",
            ScoreRating::Good => "Good",
            ScoreRating::Fair => "Fair",
            ScoreRating::Poor => "Poor",
            ScoreRating::NeedsWork => "Needs Work",
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
