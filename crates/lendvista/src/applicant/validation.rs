use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::{FinancialProfile, PersonalProfile};

const MIN_AGE: u8 = 18;
const MAX_AGE: u8 = 100;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// Single form-level problem with an applicant submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

/// Every issue found in a submission, collected rather than failing on the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("applicant submission invalid: {}", summarize(.issues))]
pub struct ApplicantInvalid {
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Boundary checks run before scoring. The engine itself assumes these ranges hold.
pub fn validate_applicant(
    personal: &PersonalProfile,
    financial: &FinancialProfile,
) -> Result<(), ApplicantInvalid> {
    let mut issues = Vec::new();

    if personal.full_name.trim().chars().count() < 2 {
        issues.push(issue("fullName", "must be at least 2 characters"));
    }
    if !(MIN_AGE..=MAX_AGE).contains(&personal.age) {
        issues.push(issue(
            "age",
            &format!("must be between {MIN_AGE} and {MAX_AGE}"),
        ));
    }
    if personal.phone.trim().chars().count() < 7 {
        issues.push(issue("phone", "must be at least 7 characters"));
    }
    if !email_pattern().is_match(personal.email.trim()) {
        issues.push(issue("email", "must be a valid address"));
    }

    for (field, value) in [
        ("monthlyIncome", financial.monthly_income),
        ("monthlyExpenses", financial.monthly_expenses),
        ("existingDebt", financial.existing_debt),
    ] {
        if !value.is_finite() || value < 0.0 {
            issues.push(issue(field, "must be a non-negative number"));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ApplicantInvalid { issues })
    }
}

fn issue(field: &'static str, message: &str) -> ValidationIssue {
    ValidationIssue {
        field,
        message: message.to_string(),
    }
}
