use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use super::classifier::Classifier;
use super::domain::ApplicationSubmission;
use super::evaluation::EligibilityResult;
use super::service::{EligibilityService, ScoringError};

/// Response envelope for a scored application.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub scored_at: DateTime<Utc>,
    pub verdict: &'static str,
    pub decision_summary: String,
    pub result: EligibilityResult,
}

impl ScoreResponse {
    pub fn new(result: EligibilityResult) -> Self {
        Self {
            scored_at: Utc::now(),
            verdict: result.verdict().label(),
            decision_summary: result.decision.summary(),
            result,
        }
    }
}

/// Router builder exposing the scoring endpoint.
pub fn eligibility_router<C>(service: Arc<EligibilityService<C>>) -> Router
where
    C: Classifier + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/eligibility", post(score_handler::<C>))
        .with_state(service)
}

pub(crate) async fn score_handler<C>(
    State(service): State<Arc<EligibilityService<C>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    C: Classifier + ?Sized + 'static,
{
    match service.score(submission) {
        Ok(result) => (StatusCode::OK, axum::Json(ScoreResponse::new(result))).into_response(),
        Err(ScoringError::InvalidApplicant(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ScoringError::Classifier(error)) => {
            let payload = json!({
                "error": format!("scoring failed: {error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
