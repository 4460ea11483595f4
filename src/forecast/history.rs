use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::errors::{PredictionError, PredictionResult};
use super::types::BranchHistory;
use crate::domain::repositories::{BranchRepository, CrowdSampleRepository, VisitorLogRepository};

/// Days of history the prompt is allowed to see
pub const HISTORY_WINDOW_DAYS: i64 = 30;

/// Reads the trailing history window for a branch
pub struct HistoryGatherer {
    branches: Arc<dyn BranchRepository>,
    visitor_logs: Arc<dyn VisitorLogRepository>,
    crowd_samples: Arc<dyn CrowdSampleRepository>,
}

impl HistoryGatherer {
    pub fn new(
        branches: Arc<dyn BranchRepository>,
        visitor_logs: Arc<dyn VisitorLogRepository>,
        crowd_samples: Arc<dyn CrowdSampleRepository>,
    ) -> Self {
        Self {
            branches,
            visitor_logs,
            crowd_samples,
        }
    }

    /// Gather the branch plus its logs and samples from the last
    /// [`HISTORY_WINDOW_DAYS`] days before `as_of`
    ///
    /// The branch is resolved before any history query runs.
    ///
    /// # Errors
    /// * `BranchNotFound` - No branch has this ID
    /// * `PersistenceFailed` - A store query failed
    pub async fn gather(&self, branch_id: &str, as_of: DateTime<Utc>) -> PredictionResult<BranchHistory> {
        let branch = self
            .branches
            .find_by_id(branch_id)
            .await?
            .ok_or_else(|| PredictionError::BranchNotFound(branch_id.to_string()))?;

        let since = window_start(as_of);

        let visitor_logs = self.visitor_logs.find_by_branch_since(branch_id, since).await?;
        let crowd_samples = self.crowd_samples.find_by_branch_since(branch_id, since).await?;

        tracing::debug!(
            branch_id = %branch_id,
            visitor_logs = visitor_logs.len(),
            crowd_samples = crowd_samples.len(),
            "Gathered branch history"
        );

        Ok(BranchHistory {
            branch,
            visitor_logs,
            crowd_samples,
        })
    }
}

/// Start of the history window ending at `as_of`
pub fn window_start(as_of: DateTime<Utc>) -> DateTime<Utc> {
    as_of - Duration::days(HISTORY_WINDOW_DAYS)
}
