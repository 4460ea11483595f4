// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_branch_repository;
pub mod postgres_crowd_repository;
pub mod postgres_prediction_repository;
pub mod postgres_visitor_log_repository;

pub use postgres_branch_repository::PostgresBranchRepository;
pub use postgres_crowd_repository::PostgresCrowdSampleRepository;
pub use postgres_prediction_repository::PostgresPredictionRepository;
pub use postgres_visitor_log_repository::PostgresVisitorLogRepository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repositories::Repositories;

/// Wire every repository to the same PostgreSQL pool
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        branches: Arc::new(PostgresBranchRepository::new(pool.clone())),
        visitor_logs: Arc::new(PostgresVisitorLogRepository::new(pool.clone())),
        crowd_samples: Arc::new(PostgresCrowdSampleRepository::new(pool.clone())),
        predictions: Arc::new(PostgresPredictionRepository::new(pool)),
    }
}
