use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::crowd::CrowdSample;
use crate::domain::repositories::{CrowdSampleRepository, Page, RepositoryResult};

/// PostgreSQL implementation of CrowdSampleRepository
pub struct PostgresCrowdSampleRepository {
    pool: PgPool,
}

impl PostgresCrowdSampleRepository {
    /// Creates a new PostgresCrowdSampleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CrowdSampleRow {
    crowd_data_id: String,
    branch_id: String,
    recorded_at: DateTime<Utc>,
    crowd_count: i32,
}

impl From<CrowdSampleRow> for CrowdSample {
    fn from(r: CrowdSampleRow) -> Self {
        CrowdSample {
            id: r.crowd_data_id,
            branch_id: r.branch_id,
            recorded_at: r.recorded_at,
            crowd_count: r.crowd_count,
        }
    }
}

#[async_trait]
impl CrowdSampleRepository for PostgresCrowdSampleRepository {
    async fn create(&self, sample: &CrowdSample) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO crowd_data (crowd_data_id, branch_id, recorded_at, crowd_count)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&sample.id)
        .bind(&sample.branch_id)
        .bind(sample.recorded_at)
        .bind(sample.crowd_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_branch(&self, branch_id: &str, page: Page) -> RepositoryResult<Vec<CrowdSample>> {
        let rows = sqlx::query_as::<_, CrowdSampleRow>(
            r#"
            SELECT crowd_data_id, branch_id, recorded_at, crowd_count
            FROM crowd_data
            WHERE branch_id = $1
            ORDER BY recorded_at DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(branch_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CrowdSample::from).collect())
    }

    async fn find_by_branch_since(
        &self,
        branch_id: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<CrowdSample>> {
        let rows = sqlx::query_as::<_, CrowdSampleRow>(
            r#"
            SELECT crowd_data_id, branch_id, recorded_at, crowd_count
            FROM crowd_data
            WHERE branch_id = $1 AND recorded_at >= $2
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(branch_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CrowdSample::from).collect())
    }
}
