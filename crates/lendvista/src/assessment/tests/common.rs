use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::applicant::{
    ConnectionType, CreditHistory, DeviceSignals, EducationLevel, EmploymentType,
    FinancialProfile, LoanPurpose, PersonalProfile,
};
use crate::assessment::{AssessmentRequest, AssessmentService};
use crate::config::DocumentConfig;
use crate::documents::{
    DocumentKind, DocumentUpload, ExtractionError, SuppliedTextExtractor, TextExtractor,
};

pub(super) const PAYSTUB_TEXT: &str = "Gross Pay: $4,500.00 Net: $3,200 Employer: Acme Corp";
pub(super) const ID_TEXT: &str = "DRIVER LICENSE | Name: Ana Torres | DOB: 02/11/1989 | Sex: F";

pub(super) fn personal() -> PersonalProfile {
    PersonalProfile {
        full_name: "Ana Torres".to_string(),
        age: 35,
        phone: "555-0100".to_string(),
        email: "ana.torres@example.com".to_string(),
        employment_type: EmploymentType::FullTime,
        education_level: EducationLevel::Bachelor,
    }
}

pub(super) fn financial() -> FinancialProfile {
    FinancialProfile {
        monthly_income: 5000.0,
        monthly_expenses: 2000.0,
        existing_debt: 3000.0,
        credit_history: CreditHistory::Excellent,
        loan_purpose: LoanPurpose::HomeImprovement,
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
        user_agent: None,
    }
}

pub(super) fn upload(kind: DocumentKind, file_name: &str, text: &str) -> DocumentUpload {
    DocumentUpload {
        kind,
        file_name: file_name.to_string(),
        content_type: "application/pdf".to_string(),
        size_bytes: 84_000,
        last_modified: Utc
            .with_ymd_and_hms(2024, 5, 20, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
        image_width: None,
        image_height: None,
        text: Some(text.to_string()),
    }
}

pub(super) fn id_upload() -> DocumentUpload {
    upload(DocumentKind::Id, "license.pdf", ID_TEXT)
}

pub(super) fn income_upload() -> DocumentUpload {
    upload(DocumentKind::Income, "paystub.pdf", PAYSTUB_TEXT)
}

/// Strong applicant with both documents attached.
pub(super) fn strong_request() -> AssessmentRequest {
    AssessmentRequest {
        personal: personal(),
        financial: financial(),
        device: capable_device(),
        id_document: Some(id_upload()),
        income_document: Some(income_upload()),
    }
}

/// No income, no documents, default device signals.
pub(super) fn thin_file_request() -> AssessmentRequest {
    AssessmentRequest {
        personal: PersonalProfile {
            age: 20,
            employment_type: EmploymentType::Unemployed,
            education_level: EducationLevel::HighSchool,
            ..personal()
        },
        financial: FinancialProfile {
            monthly_income: 0.0,
            monthly_expenses: 0.0,
            existing_debt: 0.0,
            credit_history: CreditHistory::Poor,
            loan_purpose: LoanPurpose::Personal,
        },
        device: DeviceSignals::default(),
        id_document: None,
        income_document: None,
    }
}

pub(super) fn limits() -> DocumentConfig {
    DocumentConfig {
        extraction_timeout_ms: 1_000,
        max_upload_bytes: 1024 * 1024,
    }
}

pub(super) fn build_service() -> Arc<AssessmentService<SuppliedTextExtractor>> {
    Arc::new(AssessmentService::new(
        Arc::new(SuppliedTextExtractor),
        limits(),
    ))
}

/// Records which files were decoded and fails for the ones listed in `failing`.
#[derive(Default, Clone)]
pub(super) struct RecordingExtractor {
    calls: Arc<Mutex<Vec<String>>>,
    failing: Vec<String>,
}

impl RecordingExtractor {
    pub(super) fn failing_on(file_name: &str) -> Self {
        Self {
            failing: vec![file_name.to_string()],
            ..Self::default()
        }
    }

    pub(super) fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().expect("extractor mutex poisoned").clone();
        calls.sort();
        calls
    }
}

impl TextExtractor for RecordingExtractor {
    fn extract_text(&self, upload: &DocumentUpload) -> Result<String, ExtractionError> {
        self.calls
            .lock()
            .expect("extractor mutex poisoned")
            .push(upload.file_name.clone());

        if self.failing.contains(&upload.file_name) {
            return Err(ExtractionError::Unreadable {
                file_name: upload.file_name.clone(),
                reason: "encrypted".to_string(),
            });
        }
        Ok(upload.text.clone().unwrap_or_default())
    }
}

/// Formatted log lines emitted on the current thread while the guard is held.
#[derive(Default, Clone)]
pub(super) struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub(super) fn install(&self) -> tracing::subscriber::DefaultGuard {
        let capture = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || capture.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(super) fn lines(&self) -> Vec<String> {
        let bytes = self.buffer.lock().expect("log mutex poisoned").clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .expect("log mutex poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
