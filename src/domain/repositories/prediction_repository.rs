use async_trait::async_trait;

use super::errors::RepositoryResult;
use super::Page;
use crate::domain::prediction::WaitTimePrediction;

/// Repository trait for the WaitTimePrediction aggregate
///
/// List queries return the newest `predicted_at` first.
#[async_trait]
pub trait PredictionRepository: Send + Sync {
    /// Insert a new prediction atomically
    async fn insert(&self, prediction: &WaitTimePrediction) -> RepositoryResult<()>;

    /// Find a prediction by its ID
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<WaitTimePrediction>>;

    /// Page through all predictions
    async fn find_all(&self, page: Page) -> RepositoryResult<Vec<WaitTimePrediction>>;

    /// Page through one visitor's predictions
    async fn find_by_visitor(
        &self,
        visitor_id: &str,
        page: Page,
    ) -> RepositoryResult<Vec<WaitTimePrediction>>;

    /// Page through one branch's predictions
    async fn find_by_branch(
        &self,
        branch_id: &str,
        page: Page,
    ) -> RepositoryResult<Vec<WaitTimePrediction>>;

    /// Overwrite a stored prediction
    ///
    /// Fails with `NotFound` if no row has the prediction's ID.
    async fn update(&self, prediction: &WaitTimePrediction) -> RepositoryResult<()>;

    /// Delete a prediction by ID
    ///
    /// Fails with `NotFound` if nothing was deleted.
    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}
