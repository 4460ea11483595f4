// Repository contracts (ports)
// Infrastructure adapters implement these; the forecast workflow and the
// HTTP handlers depend only on the traits.

pub mod branch_repository;
pub mod crowd_repository;
pub mod errors;
pub mod prediction_repository;
pub mod visitor_log_repository;

pub use branch_repository::BranchRepository;
pub use crowd_repository::CrowdSampleRepository;
pub use errors::{RepositoryError, RepositoryResult};
pub use prediction_repository::PredictionRepository;
pub use visitor_log_repository::VisitorLogRepository;

use std::sync::Arc;

/// Handles to every store the service needs, injected at startup
#[derive(Clone)]
pub struct Repositories {
    pub branches: Arc<dyn BranchRepository>,
    pub visitor_logs: Arc<dyn VisitorLogRepository>,
    pub crowd_samples: Arc<dyn CrowdSampleRepository>,
    pub predictions: Arc<dyn PredictionRepository>,
}

/// Offset pagination for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 1000;

    /// Builds a page, enforcing `skip >= 0` and `1 <= limit <= 1000`
    ///
    /// # Example
    /// ```
    /// use smartqueue_api::domain::repositories::Page;
    ///
    /// let page = Page::new(None, None).unwrap();
    /// assert_eq!(page, Page { skip: 0, limit: 100 });
    /// assert!(Page::new(Some(0), Some(1001)).is_err());
    /// ```
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Result<Self, String> {
        let skip = skip.unwrap_or(0);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);

        if skip < 0 {
            return Err("skip must be zero or greater".to_string());
        }
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err(format!("limit must be between 1 and {}", Self::MAX_LIMIT));
        }

        Ok(Self { skip, limit })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
