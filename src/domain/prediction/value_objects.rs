use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Partial update for a wait-time prediction
///
/// Every field is optional; `None` leaves the stored value untouched.
/// The mapping onto the aggregate lives in
/// [`WaitTimePrediction::apply`](super::WaitTimePrediction::apply).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionUpdate {
    pub visitor_id: Option<String>,
    pub branch_id: Option<String>,
    #[serde(default, deserialize_with = "crate::domain::dates::deserialize_optional_datetime")]
    pub visit_date: Option<DateTime<Utc>>,
    pub predicted_wait_time: Option<f64>,
    pub actual_wait_time: Option<f64>,
    pub accuracy: Option<f64>,
}

impl PredictionUpdate {
    /// Returns true when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
