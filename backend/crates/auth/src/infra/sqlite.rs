//! SQLite Repository Implementations

use sqlx::SqlitePool;

use crate::domain::entity::operator::Operator;
use crate::domain::repository::OperatorRepository;
use crate::error::AuthResult;

/// SQLite-backed operator repository
#[derive(Clone)]
pub struct SqliteOperatorRepository {
    pool: SqlitePool,
}

impl SqliteOperatorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl OperatorRepository for SqliteOperatorRepository {
    async fn ensure_exists(&self, operator: &Operator) -> AuthResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO operators (id, name, role, active)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(operator.id.as_str())
        .bind(&operator.name)
        .bind(operator.role.code())
        .bind(operator.active)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }
}
