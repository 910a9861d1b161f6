//! Applicant-entered profiles and passive device telemetry consumed by the scoring engine.

mod validation;

pub use validation::{validate_applicant, ApplicantInvalid, ValidationIssue};

use serde::{Deserialize, Serialize};

/// Personal details captured once from the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalProfile {
    pub full_name: String,
    pub age: u8,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub education_level: EducationLevel,
}

/// Self-reported monthly finances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub existing_debt: f64,
    #[serde(default)]
    pub credit_history: CreditHistory,
    #[serde(default)]
    pub loan_purpose: LoanPurpose,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    SelfEmployed,
    PartTime,
    Freelancer,
    Retired,
    Student,
    Unemployed,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EducationLevel {
    Doctorate,
    Master,
    Bachelor,
    Associate,
    HighSchool,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditHistory {
    Excellent,
    Good,
    Fair,
    Poor,
    None,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Stated purpose of the loan. Recorded for the offer but never scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanPurpose {
    DebtConsolidation,
    HomeImprovement,
    Education,
    Business,
    Medical,
    Vehicle,
    Personal,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "4g")]
    FourG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "slow-2g")]
    Slow2G,
    #[default]
    #[serde(rename = "unknown")]
    #[serde(other)]
    Unknown,
}

/// Read-only snapshot of the requesting client, collected once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceSignals {
    pub supports_modern_graphics: bool,
    pub supports_background_workers: bool,
    pub cpu_core_count: Option<u32>,
    #[serde(rename = "deviceMemoryGB")]
    pub device_memory_gb: Option<u32>,
    pub connection_type: ConnectionType,
    pub screen_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl DeviceSignals {
    /// Coarse browser family from the user agent. Checks run in a fixed order, so
    /// Chromium-based browsers that also advertise `Chrome` classify by the first hit.
    pub fn browser_name(&self) -> &'static str {
        let Some(ua) = self.user_agent.as_deref() else {
            return "Unknown";
        };

        if ua.contains("Firefox") {
            "Firefox"
        } else if ua.contains("Edg") {
            "Edge"
        } else if ua.contains("Chrome") {
            "Chrome"
        } else if ua.contains("Safari") {
            "Safari"
        } else if ua.contains("Opera") || ua.contains("OPR") {
            "Opera"
        } else {
            "Unknown"
        }
    }
}
