use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::prediction::WaitTimePrediction;
use crate::domain::repositories::{Page, PredictionRepository, RepositoryError, RepositoryResult};

/// PostgreSQL implementation of PredictionRepository
///
/// Inserts run inside a transaction, so a failed write leaves no row behind.
pub struct PostgresPredictionRepository {
    pool: PgPool,
}

impl PostgresPredictionRepository {
    /// Creates a new PostgresPredictionRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PredictionRow {
    wait_time_prediction_id: String,
    visitor_id: String,
    branch_id: String,
    visit_date: DateTime<Utc>,
    predicted_wait_time: f64,
    actual_wait_time: f64,
    accuracy: f64,
    predicted_at: DateTime<Utc>,
}

impl From<PredictionRow> for WaitTimePrediction {
    fn from(r: PredictionRow) -> Self {
        WaitTimePrediction::from_persistence(
            r.wait_time_prediction_id,
            r.visitor_id,
            r.branch_id,
            r.visit_date,
            r.predicted_wait_time,
            r.actual_wait_time,
            r.accuracy,
            r.predicted_at,
        )
    }
}

#[async_trait]
impl PredictionRepository for PostgresPredictionRepository {
    async fn insert(&self, prediction: &WaitTimePrediction) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO wait_time_predictions (
                wait_time_prediction_id, visitor_id, branch_id, visit_date,
                predicted_wait_time, actual_wait_time, accuracy, predicted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(prediction.id())
        .bind(prediction.visitor_id())
        .bind(prediction.branch_id())
        .bind(prediction.visit_date())
        .bind(prediction.predicted_wait_time())
        .bind(prediction.actual_wait_time())
        .bind(prediction.accuracy())
        .bind(prediction.predicted_at())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<WaitTimePrediction>> {
        let row = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT wait_time_prediction_id, visitor_id, branch_id, visit_date,
                   predicted_wait_time, actual_wait_time, accuracy, predicted_at
            FROM wait_time_predictions
            WHERE wait_time_prediction_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WaitTimePrediction::from))
    }

    async fn find_all(&self, page: Page) -> RepositoryResult<Vec<WaitTimePrediction>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT wait_time_prediction_id, visitor_id, branch_id, visit_date,
                   predicted_wait_time, actual_wait_time, accuracy, predicted_at
            FROM wait_time_predictions
            ORDER BY predicted_at DESC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WaitTimePrediction::from).collect())
    }

    async fn find_by_visitor(
        &self,
        visitor_id: &str,
        page: Page,
    ) -> RepositoryResult<Vec<WaitTimePrediction>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT wait_time_prediction_id, visitor_id, branch_id, visit_date,
                   predicted_wait_time, actual_wait_time, accuracy, predicted_at
            FROM wait_time_predictions
            WHERE visitor_id = $1
            ORDER BY predicted_at DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(visitor_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WaitTimePrediction::from).collect())
    }

    async fn find_by_branch(
        &self,
        branch_id: &str,
        page: Page,
    ) -> RepositoryResult<Vec<WaitTimePrediction>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT wait_time_prediction_id, visitor_id, branch_id, visit_date,
                   predicted_wait_time, actual_wait_time, accuracy, predicted_at
            FROM wait_time_predictions
            WHERE branch_id = $1
            ORDER BY predicted_at DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(branch_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WaitTimePrediction::from).collect())
    }

    async fn update(&self, prediction: &WaitTimePrediction) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE wait_time_predictions SET
                visitor_id = $2,
                branch_id = $3,
                visit_date = $4,
                predicted_wait_time = $5,
                actual_wait_time = $6,
                accuracy = $7
            WHERE wait_time_prediction_id = $1
            "#,
        )
        .bind(prediction.id())
        .bind(prediction.visitor_id())
        .bind(prediction.branch_id())
        .bind(prediction.visit_date())
        .bind(prediction.predicted_wait_time())
        .bind(prediction.actual_wait_time())
        .bind(prediction.accuracy())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Wait time prediction {}",
                prediction.id()
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM wait_time_predictions WHERE wait_time_prediction_id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Wait time prediction {}", id)));
        }

        Ok(())
    }
}
