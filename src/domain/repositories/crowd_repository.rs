use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::RepositoryResult;
use super::Page;
use crate::domain::crowd::CrowdSample;

/// Repository trait for crowd occupancy samples
#[async_trait]
pub trait CrowdSampleRepository: Send + Sync {
    /// Insert a new sample
    async fn create(&self, sample: &CrowdSample) -> RepositoryResult<()>;

    /// Page through a branch's samples, newest first
    async fn find_by_branch(&self, branch_id: &str, page: Page) -> RepositoryResult<Vec<CrowdSample>>;

    /// All of a branch's samples taken at or after `since`, newest first
    async fn find_by_branch_since(
        &self,
        branch_id: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<CrowdSample>>;
}
