use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::errors::PredictionResult;
use crate::domain::prediction::WaitTimePrediction;
use crate::domain::repositories::{PredictionRepository, VisitorLogRepository};

/// Persists oracle verdicts as new predictions
///
/// The stored `actual_wait_time` is the mean wait over the branch's entire
/// log history, not the prompt window, and `0.0` when there are no logs.
pub struct PredictionRecorder {
    predictions: Arc<dyn PredictionRepository>,
    visitor_logs: Arc<dyn VisitorLogRepository>,
}

impl PredictionRecorder {
    pub fn new(
        predictions: Arc<dyn PredictionRepository>,
        visitor_logs: Arc<dyn VisitorLogRepository>,
    ) -> Self {
        Self {
            predictions,
            visitor_logs,
        }
    }

    /// Mean historical wait for a branch, `0.0` without history
    pub async fn historical_average(&self, branch_id: &str) -> PredictionResult<f64> {
        Ok(self
            .visitor_logs
            .average_wait_time(branch_id)
            .await?
            .unwrap_or(0.0))
    }

    /// Store a new prediction; every call creates a fresh record
    ///
    /// # Errors
    /// * `PersistenceFailed` - The average query or the insert failed;
    ///   nothing is stored in that case
    pub async fn record(
        &self,
        branch_id: &str,
        visitor_id: &str,
        visit_date: DateTime<Utc>,
        predicted_wait_time: f64,
        accuracy: f64,
    ) -> PredictionResult<WaitTimePrediction> {
        let actual_wait_time = self.historical_average(branch_id).await?;

        let prediction = WaitTimePrediction::new(
            visitor_id.to_string(),
            branch_id.to_string(),
            visit_date,
            predicted_wait_time,
            actual_wait_time,
            accuracy,
        );

        self.predictions.insert(&prediction).await?;

        tracing::info!(
            prediction_id = %prediction.id(),
            branch_id = %branch_id,
            predicted_wait_time,
            actual_wait_time,
            "Recorded wait time prediction"
        );

        Ok(prediction)
    }
}
