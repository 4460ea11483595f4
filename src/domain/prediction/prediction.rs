use super::value_objects::PredictionUpdate;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Wait-time prediction aggregate root
///
/// Ties an oracle estimate to a visitor, a branch and a target visit date.
///
/// # Invariants
/// - `actual_wait_time` is the branch's historical average, computed locally
/// - `predicted_wait_time` and `accuracy` come from the oracle or an explicit patch
/// - Visitor and branch references are never empty
#[derive(Debug, Clone, PartialEq)]
pub struct WaitTimePrediction {
    id: String,
    visitor_id: String,
    branch_id: String,
    visit_date: DateTime<Utc>,
    predicted_wait_time: f64,
    actual_wait_time: f64,
    accuracy: f64,
    predicted_at: DateTime<Utc>,
}

impl WaitTimePrediction {
    /// Creates a new prediction with a fresh identity, stamped now
    ///
    /// # Example
    /// ```
    /// use chrono::Utc;
    /// use smartqueue_api::domain::prediction::WaitTimePrediction;
    ///
    /// let prediction = WaitTimePrediction::new(
    ///     "V1".to_string(),
    ///     "B1".to_string(),
    ///     Utc::now(),
    ///     12.0,
    ///     20.0,
    ///     0.5,
    /// );
    ///
    /// assert_eq!(prediction.predicted_wait_time(), 12.0);
    /// ```
    pub fn new(
        visitor_id: String,
        branch_id: String,
        visit_date: DateTime<Utc>,
        predicted_wait_time: f64,
        actual_wait_time: f64,
        accuracy: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            visitor_id,
            branch_id,
            visit_date,
            predicted_wait_time,
            actual_wait_time,
            accuracy,
            predicted_at: Utc::now(),
        }
    }

    /// Applies a partial update field by field
    ///
    /// # Returns
    /// * `Err(String)` - If a patched reference is empty or a number is not finite;
    ///   the prediction is left unchanged in that case
    pub fn apply(&mut self, update: PredictionUpdate) -> Result<(), String> {
        if matches!(&update.visitor_id, Some(v) if v.trim().is_empty()) {
            return Err("Visitor id cannot be empty".to_string());
        }
        if matches!(&update.branch_id, Some(b) if b.trim().is_empty()) {
            return Err("Branch id cannot be empty".to_string());
        }
        let numbers = [
            update.predicted_wait_time,
            update.actual_wait_time,
            update.accuracy,
        ];
        if numbers.iter().flatten().any(|n| !n.is_finite()) {
            return Err("Prediction values must be finite numbers".to_string());
        }

        let PredictionUpdate {
            visitor_id,
            branch_id,
            visit_date,
            predicted_wait_time,
            actual_wait_time,
            accuracy,
        } = update;

        if let Some(visitor_id) = visitor_id {
            self.visitor_id = visitor_id;
        }
        if let Some(branch_id) = branch_id {
            self.branch_id = branch_id;
        }
        if let Some(visit_date) = visit_date {
            self.visit_date = visit_date;
        }
        if let Some(predicted) = predicted_wait_time {
            self.predicted_wait_time = predicted;
        }
        if let Some(actual) = actual_wait_time {
            self.actual_wait_time = actual;
        }
        if let Some(accuracy) = accuracy {
            self.accuracy = accuracy;
        }

        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn visitor_id(&self) -> &str {
        &self.visitor_id
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn visit_date(&self) -> DateTime<Utc> {
        self.visit_date
    }

    pub fn predicted_wait_time(&self) -> f64 {
        self.predicted_wait_time
    }

    pub fn actual_wait_time(&self) -> f64 {
        self.actual_wait_time
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn predicted_at(&self) -> DateTime<Utc> {
        self.predicted_at
    }

    /// Reconstructs a WaitTimePrediction from persistence layer data
    ///
    /// This method bypasses validation since the data is already stored.
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: String,
        visitor_id: String,
        branch_id: String,
        visit_date: DateTime<Utc>,
        predicted_wait_time: f64,
        actual_wait_time: f64,
        accuracy: f64,
        predicted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            visitor_id,
            branch_id,
            visit_date,
            predicted_wait_time,
            actual_wait_time,
            accuracy,
            predicted_at,
        }
    }
}
