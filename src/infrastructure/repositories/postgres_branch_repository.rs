use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::branch::Branch;
use crate::domain::repositories::{BranchRepository, RepositoryError, RepositoryResult};

/// PostgreSQL implementation of BranchRepository
pub struct PostgresBranchRepository {
    pool: PgPool,
}

impl PostgresBranchRepository {
    /// Creates a new PostgresBranchRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BranchRow {
    branch_id: String,
    institution_id: Option<String>,
    name: String,
    address: Option<String>,
    capacity: i32,
}

impl From<BranchRow> for Branch {
    fn from(r: BranchRow) -> Self {
        Branch {
            id: r.branch_id,
            institution_id: r.institution_id,
            name: r.name,
            address: r.address,
            capacity: r.capacity,
        }
    }
}

#[async_trait]
impl BranchRepository for PostgresBranchRepository {
    /// A duplicate id is `Conflict`, also when a concurrent insert wins
    async fn create(&self, branch: &Branch) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO branches (branch_id, institution_id, name, address, capacity)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&branch.id)
        .bind(&branch.institution_id)
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(branch.capacity)
        .execute(&self.pool)
        .await
        .map_err(|e| match RepositoryError::from(e) {
            RepositoryError::Conflict(_) => RepositoryError::Conflict(format!("Branch {}", branch.id)),
            other => other,
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Branch>> {
        let row = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT branch_id, institution_id, name, address, capacity
            FROM branches
            WHERE branch_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Branch::from))
    }
}
