use crate::infra::{parse_kind, read_request, record_from_path};
use chrono::Utc;
use clap::Args;
use lendvista::applicant::{
    ConnectionType, CreditHistory, DeviceSignals, EducationLevel, EmploymentType,
    FinancialProfile, LoanPurpose, PersonalProfile,
};
use lendvista::assessment::{AssessmentOutcome, AssessmentRequest, AssessmentService};
use lendvista::config::{AppConfig, DocumentConfig};
use lendvista::documents::{
    DocumentKind, DocumentRecordBuilder, DocumentUpload, SuppliedTextExtractor,
};
use lendvista::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding the assessment request (camelCase fields)
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ExtractArgs {
    /// Document kind: id or income
    #[arg(long, value_parser = parse_kind)]
    pub(crate) kind: DocumentKind,
    /// Plain-text file holding the decoded document text
    pub(crate) file: PathBuf,
    /// Print the raw field map as JSON instead of labeled rows
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each outcome as JSON after the summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let request = read_request(&args.input)?;

    let service = AssessmentService::new(Arc::new(SuppliedTextExtractor), config.documents);
    let outcome = service.assess(request).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

pub(crate) fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    let record = record_from_path(&args.file, args.kind)?;
    let fields = DocumentRecordBuilder::new().build(&record);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    println!("{} ({})", args.kind.label(), record.file_name);
    for row in fields.display_rows(args.kind) {
        println!("  {}: {}", row.label, row.value);
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = AssessmentService::new(Arc::new(SuppliedTextExtractor), DocumentConfig::default());

    println!("LendVista pre-qualification demo");
    for (title, request) in [
        ("Established applicant", established_applicant()),
        ("Thin-file applicant", thin_file_applicant()),
    ] {
        let outcome = service.assess(request).await?;
        render_outcome(title, &outcome);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

fn render_outcome(title: &str, outcome: &AssessmentOutcome) {
    println!("\n{title}");
    println!(
        "- Score {} ({}) | weighted total {:.2}",
        outcome.score, outcome.rating, outcome.weighted_total
    );
    println!("  Breakdown:");
    for component in &outcome.components {
        println!(
            "    - {} ({}%): {}",
            component.label, component.weight, component.score
        );
    }

    let offer = &outcome.offer;
    println!(
        "  Offer: ${} at {:.1}% APR over {} months -> ${:.2}/month (${:.2} total)",
        offer.amount,
        offer.apr,
        offer.term_months,
        offer.monthly_payment,
        offer.total_repayment()
    );

    for (kind, fields) in [
        (DocumentKind::Id, outcome.documents.id.as_ref()),
        (DocumentKind::Income, outcome.documents.income.as_ref()),
    ] {
        match fields {
            Some(fields) => {
                println!("  {}:", kind.label());
                for row in fields.display_rows(kind) {
                    println!("    - {}: {}", row.label, row.value);
                }
            }
            None => println!("  {}: not uploaded", kind.label()),
        }
    }
}

fn established_applicant() -> AssessmentRequest {
    let uploaded = Utc::now();

    AssessmentRequest {
        personal: PersonalProfile {
            full_name: "Priya Raman".to_string(),
            age: 38,
            phone: "+1 515 555 0134".to_string(),
            email: "priya.raman@example.com".to_string(),
            employment_type: EmploymentType::FullTime,
            education_level: EducationLevel::Master,
        },
        financial: FinancialProfile {
            monthly_income: 6400.0,
            monthly_expenses: 3100.0,
            existing_debt: 9000.0,
            credit_history: CreditHistory::Good,
            loan_purpose: LoanPurpose::HomeImprovement,
        },
        device: DeviceSignals {
            supports_modern_graphics: true,
            supports_background_workers: true,
            cpu_core_count: Some(8),
            device_memory_gb: Some(16),
            connection_type: ConnectionType::FourG,
            screen_width: 2560,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 Version/17.4 Safari/605.1.15"
                    .to_string(),
            ),
        },
        id_document: Some(DocumentUpload {
            kind: DocumentKind::Id,
            file_name: "drivers-license.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            size_bytes: 412_883,
            last_modified: uploaded,
            image_width: Some(1600),
            image_height: Some(1010),
            text: None,
        }),
        income_document: Some(DocumentUpload {
            kind: DocumentKind::Income,
            file_name: "paystub-2024-03.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size_bytes: 96_412,
            last_modified: uploaded,
            image_width: None,
            image_height: None,
            text: Some(
                "Employer: Cedar Valley Health | Pay Period: 03/01/2024 - 03/31/2024 | \
                 Gross Pay: $6,400.00 | Net Pay: $4,812.55 | Deductions $1,587.45"
                    .to_string(),
            ),
        }),
    }
}

fn thin_file_applicant() -> AssessmentRequest {
    AssessmentRequest {
        personal: PersonalProfile {
            full_name: "Mateo Silva".to_string(),
            age: 21,
            phone: "+1 515 555 0199".to_string(),
            email: "mateo.silva@example.com".to_string(),
            employment_type: EmploymentType::Student,
            education_level: EducationLevel::HighSchool,
        },
        financial: FinancialProfile {
            monthly_income: 900.0,
            monthly_expenses: 750.0,
            existing_debt: 1200.0,
            credit_history: CreditHistory::None,
            loan_purpose: LoanPurpose::Education,
        },
        device: DeviceSignals {
            connection_type: ConnectionType::ThreeG,
            screen_width: 390,
            ..DeviceSignals::default()
        },
        id_document: None,
        income_document: None,
    }
}
