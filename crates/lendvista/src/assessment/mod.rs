//! Applicant assessment: validation, document extraction, scoring and offer pricing behind a
//! single service facade and its HTTP router.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::assessment_router;
pub use service::{AssessmentError, AssessmentService};

use serde::{Deserialize, Serialize};

use crate::applicant::{DeviceSignals, FinancialProfile, PersonalProfile};
use crate::documents::{DocumentUpload, ExtractedFields};
use crate::offer::LoanOffer;
use crate::scoring::{CreditScore, ScoreBreakdown, ScoreComponent, ScoreRating};

/// Everything collected from one applicant session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub personal: PersonalProfile,
    pub financial: FinancialProfile,
    #[serde(default)]
    pub device: DeviceSignals,
    #[serde(default)]
    pub id_document: Option<DocumentUpload>,
    #[serde(default)]
    pub income_document: Option<DocumentUpload>,
}

/// Scored result returned to the applicant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOutcome {
    pub score: CreditScore,
    pub rating: ScoreRating,
    pub weighted_total: f64,
    pub breakdown: ScoreBreakdown,
    pub components: Vec<ScoreComponent>,
    pub offer: LoanOffer,
    pub documents: DocumentFieldsView,
}

/// Field maps for whichever documents were uploaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentFieldsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ExtractedFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<ExtractedFields>,
}

/// Body accepted by the offer endpoint. Out-of-range scores are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRequest {
    pub score: CreditScore,
}
