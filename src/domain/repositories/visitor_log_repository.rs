use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::RepositoryResult;
use super::Page;
use crate::domain::visitor_log::VisitorLog;

/// Repository trait for visitor check-in logs
#[async_trait]
pub trait VisitorLogRepository: Send + Sync {
    /// Insert a new log entry
    async fn create(&self, log: &VisitorLog) -> RepositoryResult<()>;

    /// Find a log entry by its ID
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<VisitorLog>>;

    /// Page through a branch's logs, newest check-in first
    async fn find_by_branch(&self, branch_id: &str, page: Page) -> RepositoryResult<Vec<VisitorLog>>;

    /// All of a branch's logs checked in at or after `since`, newest first
    async fn find_by_branch_since(
        &self,
        branch_id: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<VisitorLog>>;

    /// Mean wait in minutes over the branch's whole history
    ///
    /// `None` when the branch has no logs.
    async fn average_wait_time(&self, branch_id: &str) -> RepositoryResult<Option<f64>>;
}
