use axum::extract::rejection::JsonRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors a prediction handler can answer with. Every variant serializes
/// to the same wire shape: `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The artifact this route depends on never loaded.
    #[error("{0} not loaded")]
    ArtifactUnavailable(&'static str),

    /// The request body could not be used as a feature vector.
    #[error("{0}")]
    MalformedInput(String),

    /// The artifact was loaded but inference failed on it.
    #[error("prediction failed: {0}")]
    PredictionFailed(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ArtifactUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::PredictionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::PredictionFailed(_) => {
                tracing::error!(error = %self, "prediction error");
            }
            ApiError::ArtifactUnavailable(_) => {
                tracing::warn!(error = %self, "artifact unavailable");
            }
            ApiError::MalformedInput(_) => {
                tracing::debug!(error = %self, "client error");
            }
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedInput(rejection.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        // alternate format keeps the whole context chain
        ApiError::PredictionFailed(format!("{error:#}"))
    }
}
