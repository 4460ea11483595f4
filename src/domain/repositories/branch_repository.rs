use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::branch::Branch;

/// Repository trait for branches
#[async_trait]
pub trait BranchRepository: Send + Sync {
    /// Insert a new branch
    async fn create(&self, branch: &Branch) -> RepositoryResult<()>;

    /// Find a branch by its ID
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Branch>>;
}
