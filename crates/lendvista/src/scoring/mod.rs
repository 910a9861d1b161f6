//! Alternative credit scoring from applicant profiles, device signals and document presence.

mod rating;
mod rules;

pub use rating::ScoreRating;

use serde::{Deserialize, Serialize};

use crate::applicant::{DeviceSignals, FinancialProfile, PersonalProfile};

/// Credit score on the 300..=850 scale. Every constructor clamps into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub struct CreditScore(u16);

impl CreditScore {
    pub const MIN: u16 = 300;
    pub const MAX: u16 = 850;

    pub fn new(value: u16) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Position within the scale, 0.0 at the floor and 1.0 at the ceiling.
    pub fn fraction(self) -> f64 {
        f64::from(self.0 - Self::MIN) / f64::from(Self::MAX - Self::MIN)
    }

    /// Map a weighted total in hundredths (0..=10_000) onto the scale, rounding halves up.
    fn from_weighted_hundredths(weighted: u32) -> Self {
        let span = u32::from(Self::MAX - Self::MIN);
        let scaled = (u32::from(Self::MIN) * 10_000 + weighted * span + 5_000) / 10_000;
        Self::new(scaled.min(u32::from(u16::MAX)) as u16)
    }
}

impl From<u16> for CreditScore {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

impl From<CreditScore> for u16 {
    fn from(score: CreditScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for CreditScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six weighted factors behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreFactor {
    IncomeDebt,
    Employment,
    CreditHistory,
    Demographics,
    DigitalFootprint,
    DocumentVerification,
}

impl ScoreFactor {
    pub const ALL: [ScoreFactor; 6] = [
        ScoreFactor::IncomeDebt,
        ScoreFactor::Employment,
        ScoreFactor::CreditHistory,
        ScoreFactor::Demographics,
        ScoreFactor::DigitalFootprint,
        ScoreFactor::DocumentVerification,
    ];

    /// Weight in percent. The six weights sum to 100.
    pub const fn weight(self) -> u8 {
        match self {
            ScoreFactor::IncomeDebt => 30,
            ScoreFactor::Employment => 20,
            ScoreFactor::CreditHistory => 25,
            ScoreFactor::Demographics => 10,
            ScoreFactor::DigitalFootprint => 10,
            ScoreFactor::DocumentVerification => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::IncomeDebt => "Income & Debt Ratio",
            ScoreFactor::Employment => "Employment Stability",
            ScoreFactor::CreditHistory => "Credit History",
            ScoreFactor::Demographics => "Demographics",
            ScoreFactor::DigitalFootprint => "Digital Footprint",
            ScoreFactor::DocumentVerification => "Document Verification",
        }
    }
}

/// Component scores, each in 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub income_debt: u8,
    pub employment: u8,
    pub credit_history: u8,
    pub demographics: u8,
    pub digital_footprint: u8,
    pub document_verification: u8,
}

impl ScoreBreakdown {
    pub fn get(&self, factor: ScoreFactor) -> u8 {
        match factor {
            ScoreFactor::IncomeDebt => self.income_debt,
            ScoreFactor::Employment => self.employment,
            ScoreFactor::CreditHistory => self.credit_history,
            ScoreFactor::Demographics => self.demographics,
            ScoreFactor::DigitalFootprint => self.digital_footprint,
            ScoreFactor::DocumentVerification => self.document_verification,
        }
    }

    /// Weighted total on a 0..=100 scale.
    pub fn weighted_total(&self) -> f64 {
        f64::from(self.weighted_hundredths()) / 100.0
    }

    fn weighted_hundredths(&self) -> u32 {
        ScoreFactor::ALL
            .iter()
            .map(|factor| u32::from(self.get(*factor).min(100)) * u32::from(factor.weight()))
            .sum()
    }

    pub fn components(&self) -> Vec<ScoreComponent> {
        ScoreFactor::ALL
            .iter()
            .map(|factor| ScoreComponent {
                factor: *factor,
                label: factor.label(),
                score: self.get(*factor),
                weight: factor.weight(),
            })
            .collect()
    }
}

/// One labeled row of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub label: &'static str,
    pub score: u8,
    pub weight: u8,
}

/// Which of the two applicant documents were accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsPresent {
    pub id: bool,
    pub income: bool,
}

/// Stateless engine combining the six component rules into a score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(
        &self,
        personal: &PersonalProfile,
        financial: &FinancialProfile,
        device: &DeviceSignals,
        documents: DocumentsPresent,
    ) -> (CreditScore, ScoreBreakdown) {
        let breakdown = ScoreBreakdown {
            income_debt: rules::income_debt(financial),
            employment: rules::employment(personal.employment_type),
            credit_history: rules::credit_history(financial.credit_history),
            demographics: rules::demographics(personal),
            digital_footprint: rules::digital_footprint(device),
            document_verification: rules::document_verification(documents),
        };

        let score = CreditScore::from_weighted_hundredths(breakdown.weighted_hundredths());
        (score, breakdown)
    }
}
