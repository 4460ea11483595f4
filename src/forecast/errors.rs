use thiserror::Error;

use crate::domain::repositories::RepositoryError;

/// Errors that can occur in the wait-time prediction workflow
///
/// Every step-level failure is translated into exactly one of these before it
/// leaves the workflow.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Prediction oracle is not configured")]
    OracleUnavailable,

    #[error("Prediction oracle call failed: {0}")]
    OracleCallFailed(String),

    #[error("Malformed oracle response: {reason}")]
    MalformedOracleResponse { reason: String, raw: String },

    #[error("Invalid prediction data: {0}")]
    Invalid(String),

    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),
}

impl PredictionError {
    pub(crate) fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        PredictionError::MalformedOracleResponse {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

impl From<RepositoryError> for PredictionError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(what) => PredictionError::NotFound(what),
            RepositoryError::Conflict(_) => PredictionError::PersistenceFailed(e.to_string()),
            RepositoryError::Storage(msg) => PredictionError::PersistenceFailed(msg),
        }
    }
}

pub type PredictionResult<T> = Result<T, PredictionError>;
