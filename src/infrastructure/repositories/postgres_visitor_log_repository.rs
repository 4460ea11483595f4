use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::repositories::{Page, RepositoryResult, VisitorLogRepository};
use crate::domain::visitor_log::VisitorLog;

/// PostgreSQL implementation of VisitorLogRepository
pub struct PostgresVisitorLogRepository {
    pool: PgPool,
}

impl PostgresVisitorLogRepository {
    /// Creates a new PostgresVisitorLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VisitorLogRow {
    visitor_log_id: String,
    visitor_name: String,
    branch_id: String,
    check_in_time: DateTime<Utc>,
    service_start_time: DateTime<Utc>,
    wait_time_minutes: i32,
}

impl From<VisitorLogRow> for VisitorLog {
    fn from(r: VisitorLogRow) -> Self {
        VisitorLog::from_persistence(
            r.visitor_log_id,
            r.visitor_name,
            r.branch_id,
            r.check_in_time,
            r.service_start_time,
            r.wait_time_minutes,
        )
    }
}

#[async_trait]
impl VisitorLogRepository for PostgresVisitorLogRepository {
    async fn create(&self, log: &VisitorLog) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO visitor_logs (
                visitor_log_id, visitor_name, branch_id,
                check_in_time, service_start_time, wait_time_minutes
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(log.id())
        .bind(log.visitor_name())
        .bind(log.branch_id())
        .bind(log.check_in_time())
        .bind(log.service_start_time())
        .bind(log.wait_time_minutes())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<VisitorLog>> {
        let row = sqlx::query_as::<_, VisitorLogRow>(
            r#"
            SELECT visitor_log_id, visitor_name, branch_id,
                   check_in_time, service_start_time, wait_time_minutes
            FROM visitor_logs
            WHERE visitor_log_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VisitorLog::from))
    }

    async fn find_by_branch(&self, branch_id: &str, page: Page) -> RepositoryResult<Vec<VisitorLog>> {
        let rows = sqlx::query_as::<_, VisitorLogRow>(
            r#"
            SELECT visitor_log_id, visitor_name, branch_id,
                   check_in_time, service_start_time, wait_time_minutes
            FROM visitor_logs
            WHERE branch_id = $1
            ORDER BY check_in_time DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(branch_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(VisitorLog::from).collect())
    }

    async fn find_by_branch_since(
        &self,
        branch_id: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<VisitorLog>> {
        let rows = sqlx::query_as::<_, VisitorLogRow>(
            r#"
            SELECT visitor_log_id, visitor_name, branch_id,
                   check_in_time, service_start_time, wait_time_minutes
            FROM visitor_logs
            WHERE branch_id = $1 AND check_in_time >= $2
            ORDER BY check_in_time DESC
            "#,
        )
        .bind(branch_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(VisitorLog::from).collect())
    }

    async fn average_wait_time(&self, branch_id: &str) -> RepositoryResult<Option<f64>> {
        // AVG over INTEGER yields NUMERIC; cast so it decodes as f64
        let average: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(wait_time_minutes)::DOUBLE PRECISION
            FROM visitor_logs
            WHERE branch_id = $1
            "#,
        )
        .bind(branch_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(average)
    }
}
