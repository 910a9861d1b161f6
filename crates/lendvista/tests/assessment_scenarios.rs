//! End-to-end scenarios through the public scoring, offer and document APIs and the HTTP
//! router, without reaching into private modules.

mod common {
    use chrono::{TimeZone, Utc};

    use lendvista::applicant::{
        ConnectionType, CreditHistory, DeviceSignals, EducationLevel, EmploymentType,
        FinancialProfile, LoanPurpose, PersonalProfile,
    };
    use lendvista::documents::{DocumentKind, DocumentRecord};

    pub(super) fn personal(
        age: u8,
        employment_type: EmploymentType,
        education_level: EducationLevel,
    ) -> PersonalProfile {
        PersonalProfile {
            full_name: "Jordan Mensah".to_string(),
            age,
            phone: "+1 555 0187".to_string(),
            email: "jordan.mensah@example.com".to_string(),
            employment_type,
            education_level,
        }
    }

    pub(super) fn financial(
        income: f64,
        expenses: f64,
        debt: f64,
        credit_history: CreditHistory,
    ) -> FinancialProfile {
        FinancialProfile {
            monthly_income: income,
            monthly_expenses: expenses,
            existing_debt: debt,
            credit_history,
            loan_purpose: LoanPurpose::DebtConsolidation,
        }
    }

    pub(super) fn capable_device() -> DeviceSignals {
        DeviceSignals {
            supports_modern_graphics: true,
            supports_background_workers: true,
            cpu_core_count: Some(8),
            device_memory_gb: Some(8),
            connection_type: ConnectionType::FourG,
            screen_width: 1920,
            user_agent: Some("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".to_string()),
        }
    }

    pub(super) fn income_record(raw_text: &str) -> DocumentRecord {
        DocumentRecord {
            kind: DocumentKind::Income,
            raw_text: raw_text.to_string(),
            file_name: "march-paystub.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            file_size_bytes: 1_572_864,
            last_modified: Utc
                .with_ymd_and_hms(2024, 4, 1, 8, 30, 0)
                .single()
                .expect("valid timestamp"),
            image_width: None,
            image_height: None,
        }
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use lendvista::applicant::{CreditHistory, DeviceSignals, EducationLevel, EmploymentType};
use lendvista::assessment::{assessment_router, AssessmentService};
use lendvista::config::DocumentConfig;
use lendvista::documents::{DocumentRecordBuilder, FieldKey, SuppliedTextExtractor};
use lendvista::offer::LoanOfferCalculator;
use lendvista::scoring::{DocumentsPresent, ScoreBreakdown, ScoreRating, ScoringEngine};

#[test]
fn strong_applicant_with_both_documents() {
    let (score, breakdown) = ScoringEngine::new().score(
        &personal(35, EmploymentType::FullTime, EducationLevel::Bachelor),
        &financial(5000.0, 2000.0, 3000.0, CreditHistory::Excellent),
        &capable_device(),
        DocumentsPresent {
            id: true,
            income: true,
        },
    );

    assert_eq!(
        breakdown,
        ScoreBreakdown {
            income_debt: 100,
            employment: 100,
            credit_history: 100,
            demographics: 90,
            digital_footprint: 100,
            document_verification: 100,
        }
    );
    assert_eq!(breakdown.weighted_total(), 99.0);
    assert_eq!(score.value(), 845);

    let offer = LoanOfferCalculator::new().offer(score);
    assert_eq!(offer.amount, 49_500);
    assert_eq!(offer.apr, 5.1);
    assert_eq!(offer.term_months, 60);
    assert_eq!(offer.monthly_payment.round(), 936.0);
}

#[test]
fn unemployed_applicant_without_income_or_documents() {
    let (score, breakdown) = ScoringEngine::new().score(
        &personal(20, EmploymentType::Unemployed, EducationLevel::HighSchool),
        &financial(0.0, 0.0, 0.0, CreditHistory::Poor),
        &DeviceSignals::default(),
        DocumentsPresent::default(),
    );

    assert_eq!(
        breakdown,
        ScoreBreakdown {
            income_debt: 10,
            employment: 15,
            credit_history: 25,
            demographics: 55,
            digital_footprint: 55,
            document_verification: 0,
        }
    );
    assert_eq!(breakdown.weighted_total(), 23.25);
    assert_eq!(score.value(), 428);
    assert_eq!(ScoreRating::from_score(score), ScoreRating::NeedsWork);

    let offer = LoanOfferCalculator::new().offer(score);
    assert_eq!(offer.amount, 11_600);
    assert_eq!(offer.term_months, 48);
    assert_eq!(offer.apr, 15.0);
}

#[test]
fn paystub_amounts_and_employer() {
    let fields = DocumentRecordBuilder::new().build(&income_record(
        "Gross Pay: $4,500.00 Net: $3,200 Employer: Acme Corp",
    ));

    assert_eq!(fields.amounts(), [4500.0, 3200.0]);
    assert_eq!(fields.largest_amount(), Some(4500.0));
    assert_eq!(fields.text(FieldKey::Employer), Some("Acme Corp"));
    assert_eq!(fields.text(FieldKey::FileSize), Some("1.5 MB"));
    assert_eq!(fields.text(FieldKey::LastModified), Some("4/1/2024"));
}

#[test]
fn blank_paystub_keeps_only_metadata() {
    let fields = DocumentRecordBuilder::new().build(&income_record("   \n  "));

    assert_eq!(fields.text(FieldKey::FileFormat), Some("PDF"));
    assert!(fields.amounts().is_empty());
    assert_eq!(fields.word_count(), 0);
    assert_eq!(fields.text_length(), 0);
}

#[tokio::test]
async fn assessment_route_scores_payload() {
    let service = Arc::new(AssessmentService::new(
        Arc::new(SuppliedTextExtractor),
        DocumentConfig::default(),
    ));
    let router = assessment_router(service);

    let payload = json!({
        "personal": {
            "fullName": "Jordan Mensah",
            "age": 35,
            "phone": "+1 555 0187",
            "email": "jordan.mensah@example.com",
            "employmentType": "full-time",
            "educationLevel": "bachelor"
        },
        "financial": {
            "monthlyIncome": 5000,
            "monthlyExpenses": 2000,
            "existingDebt": 3000,
            "creditHistory": "excellent",
            "loanPurpose": "debt-consolidation"
        },
        "device": {
            "supportsModernGraphics": true,
            "supportsBackgroundWorkers": true,
            "cpuCoreCount": 8,
            "deviceMemoryGB": 8,
            "connectionType": "4g",
            "screenWidth": 1920
        },
        "incomeDocument": {
            "kind": "income",
            "fileName": "paystub.pdf",
            "contentType": "application/pdf",
            "sizeBytes": 48213,
            "lastModified": "2024-04-01T08:30:00Z",
            "text": "Gross Pay: $4,500.00 Net: $3,200 Employer: Acme Corp"
        }
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/assessments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");

    assert_eq!(body["breakdown"]["documentVerification"], 50);
    assert_eq!(body["score"], 831);
    assert_eq!(body["rating"], "excellent");
    assert_eq!(body["documents"]["income"]["employer"], "Acme Corp");
    assert_eq!(body["documents"]["income"]["largestAmount"], 4500.0);
}
