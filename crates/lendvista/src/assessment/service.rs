use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{AssessmentOutcome, AssessmentRequest, DocumentFieldsView};
use crate::applicant::{validate_applicant, ApplicantInvalid};
use crate::config::DocumentConfig;
use crate::documents::{
    extract_with_timeout, DocumentKind, DocumentRecordBuilder, DocumentUpload, ExtractedFields,
    TextExtractor, UploadRejected,
};
use crate::offer::{LoanOffer, LoanOfferCalculator};
use crate::scoring::{CreditScore, DocumentsPresent, ScoreRating, ScoringEngine};

/// Service composing document extraction, the scoring engine and offer pricing.
pub struct AssessmentService<X> {
    extractor: Arc<X>,
    builder: DocumentRecordBuilder,
    engine: ScoringEngine,
    calculator: LoanOfferCalculator,
    limits: DocumentConfig,
}

impl<X> AssessmentService<X>
where
    X: TextExtractor + 'static,
{
    pub fn new(extractor: Arc<X>, limits: DocumentConfig) -> Self {
        Self {
            extractor,
            builder: DocumentRecordBuilder::new(),
            engine: ScoringEngine::new(),
            calculator: LoanOfferCalculator::new(),
            limits,
        }
    }

    /// Validate the submission, extract both documents concurrently, then score and price.
    pub async fn assess(
        &self,
        request: AssessmentRequest,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        let AssessmentRequest {
            personal,
            financial,
            device,
            id_document,
            income_document,
        } = request;

        validate_applicant(&personal, &financial)?;
        self.check_slot(id_document.as_ref(), DocumentKind::Id)?;
        self.check_slot(income_document.as_ref(), DocumentKind::Income)?;

        let (id, income) = tokio::join!(
            self.document_fields(id_document),
            self.document_fields(income_document)
        );
        let present = DocumentsPresent {
            id: id.is_some(),
            income: income.is_some(),
        };

        let (score, breakdown) = self.engine.score(&personal, &financial, &device, present);
        let rating = ScoreRating::from_score(score);
        let offer = self.calculator.offer(score);

        info!(
            score = score.value(),
            %rating,
            amount = offer.amount,
            apr = offer.apr,
            id_document = present.id,
            income_document = present.income,
            ?breakdown,
            "applicant assessed"
        );

        Ok(AssessmentOutcome {
            score,
            rating,
            weighted_total: breakdown.weighted_total(),
            breakdown,
            components: breakdown.components(),
            offer,
            documents: DocumentFieldsView { id, income },
        })
    }

    /// Field map for a single upload, as shown while the applicant is still filling the form.
    pub async fn extract_document(
        &self,
        upload: DocumentUpload,
    ) -> Result<ExtractedFields, AssessmentError> {
        self.accept(&upload)?;
        let kind = upload.kind;

        let fields = self.fields_for(upload).await;
        debug!(kind = kind.label(), fields = fields.len(), "document fields extracted");
        Ok(fields)
    }

    pub fn offer_for(&self, score: CreditScore) -> LoanOffer {
        self.calculator.offer(score)
    }

    fn check_slot(
        &self,
        upload: Option<&DocumentUpload>,
        expected: DocumentKind,
    ) -> Result<(), AssessmentError> {
        let Some(upload) = upload else {
            return Ok(());
        };
        if upload.kind != expected {
            let err = AssessmentError::KindMismatch {
                expected,
                found: upload.kind,
            };
            warn!(file = %upload.file_name, error = %err, "upload rejected");
            return Err(err);
        }
        self.accept(upload)
    }

    fn accept(&self, upload: &DocumentUpload) -> Result<(), AssessmentError> {
        upload
            .validate(self.limits.max_upload_bytes)
            .map_err(|err| {
                warn!(file = %upload.file_name, error = %err, "upload rejected");
                AssessmentError::from(err)
            })
    }

    async fn document_fields(&self, upload: Option<DocumentUpload>) -> Option<ExtractedFields> {
        match upload {
            Some(upload) => Some(self.fields_for(upload).await),
            None => None,
        }
    }

    async fn fields_for(&self, upload: DocumentUpload) -> ExtractedFields {
        let text = extract_with_timeout(
            Arc::clone(&self.extractor),
            &upload,
            self.limits.extraction_timeout(),
        )
        .await;
        self.builder.build(&upload.into_record(text))
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Applicant(#[from] ApplicantInvalid),
    #[error(transparent)]
    Upload(#[from] UploadRejected),
    #[error("expected a {} upload, received a {}", .expected.label(), .found.label())]
    KindMismatch {
        expected: DocumentKind,
        found: DocumentKind,
    },
}
