//! Maps `EngineError` (spec.md §7) onto HTTP status codes and a uniform
//! JSON error body, following the teacher's `ErrorResponse` convention.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campaign_core::error::EngineError;
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            EngineError::ClientNotFound(_)
            | EngineError::AdvertiserNotFound(_)
            | EngineError::CampaignNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            EngineError::InvariantViolation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation"),
            EngineError::NoAdAvailable => (StatusCode::NOT_FOUND, "no_ad_available"),
            EngineError::RecorderRefused => (StatusCode::CONFLICT, "recorder_refused"),
            EngineError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        };
        metrics::counter!("api.errors", "kind" => code).increment(1);
        (
            status,
            Json(ErrorBody {
                error: code.to_string(),
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
