use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::service::{AssessmentError, AssessmentService};
use super::{AssessmentRequest, OfferRequest};
use crate::documents::{DocumentUpload, TextExtractor};
use crate::error::AppError;
use crate::scoring::ScoreRating;

/// Router builder exposing the assessment, document extraction and offer endpoints.
pub fn assessment_router<X>(service: Arc<AssessmentService<X>>) -> Router
where
    X: TextExtractor + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<X>))
        .route("/api/v1/documents/extract", post(extract_handler::<X>))
        .route("/api/v1/offers", post(offer_handler::<X>))
        .with_state(service)
}

pub(crate) async fn assess_handler<X>(
    State(service): State<Arc<AssessmentService<X>>>,
    payload: Result<axum::Json<AssessmentRequest>, JsonRejection>,
) -> Response
where
    X: TextExtractor + 'static,
{
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return AppError::from(err).into_response(),
    };
    match service.assess(request).await {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => rejection(error),
    }
}

pub(crate) async fn extract_handler<X>(
    State(service): State<Arc<AssessmentService<X>>>,
    payload: Result<axum::Json<DocumentUpload>, JsonRejection>,
) -> Response
where
    X: TextExtractor + 'static,
{
    let axum::Json(upload) = match payload {
        Ok(payload) => payload,
        Err(err) => return AppError::from(err).into_response(),
    };
    let kind = upload.kind;
    match service.extract_document(upload).await {
        Ok(fields) => {
            let payload = json!({
                "kind": kind,
                "rows": fields.display_rows(kind),
                "fields": fields,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => rejection(error),
    }
}

pub(crate) async fn offer_handler<X>(
    State(service): State<Arc<AssessmentService<X>>>,
    payload: Result<axum::Json<OfferRequest>, JsonRejection>,
) -> Response
where
    X: TextExtractor + 'static,
{
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return AppError::from(err).into_response(),
    };
    let offer = service.offer_for(request.score);
    let payload = json!({
        "score": request.score,
        "rating": ScoreRating::from_score(request.score),
        "offer": offer,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn rejection(error: AssessmentError) -> Response {
    let payload = match &error {
        AssessmentError::Applicant(invalid) => json!({
            "error": error.to_string(),
            "issues": invalid.issues,
        }),
        AssessmentError::Upload(_) | AssessmentError::KindMismatch { .. } => json!({
            "error": error.to_string(),
        }),
    };
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
