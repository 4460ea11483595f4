use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::repositories::RepositoryError;
use crate::forecast::PredictionError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Creates a 503 Service Unavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<PredictionError> for ApiError {
    fn from(e: PredictionError) -> Self {
        match e {
            PredictionError::BranchNotFound(_) | PredictionError::NotFound(_) => {
                ApiError::not_found(e.to_string())
            }
            PredictionError::Invalid(_) => ApiError::bad_request(e.to_string()),
            PredictionError::OracleUnavailable => ApiError::service_unavailable(e.to_string()),
            PredictionError::OracleCallFailed(_) => {
                ApiError::internal_server_error("Failed to get prediction from the oracle")
            }
            PredictionError::MalformedOracleResponse { .. } => {
                ApiError::internal_server_error("The oracle returned an unusable prediction")
            }
            PredictionError::PersistenceFailed(_) => {
                ApiError::internal_server_error("Failed to store wait time prediction")
            }
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(_) => ApiError::not_found(e.to_string()),
            RepositoryError::Conflict(_) => ApiError::bad_request(e.to_string()),
            RepositoryError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                ApiError::internal_server_error("Database error")
            }
        }
    }
}
