//! SQLite connection pool and schema migrations
//!
//! Migrations live in `database/migrations` at the repository root and are
//! embedded at compile time. They must run before the service accepts
//! traffic.

use std::path::Path;
use std::str::FromStr;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Versioned schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("../../../database/migrations");

/// Open (creating if missing) a file-backed database
pub async fn connect(path: &Path, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    tracing::debug!(path = %path.display(), max_connections, "Opening SQLite database");

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Apply all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Migrated in-memory database.
///
/// Every connection to `:memory:` is a separate database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_pool_has_schema() {
        let pool = memory_pool().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert!(tables.contains(&"operators".to_string()));
        assert!(tables.contains(&"pack_captures".to_string()));
    }

    #[tokio::test]
    async fn test_responsible_column_added_by_migration() {
        let pool = memory_pool().await.unwrap();

        let columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info('pack_captures')")
                .fetch_all(&pool)
                .await
                .unwrap();

        assert!(columns.contains(&"responsible".to_string()));
        assert!(columns.contains(&"checksum".to_string()));
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");

        let pool = connect(&path, 1).await.unwrap();
        run_migrations(&pool).await.unwrap();

        assert!(path.exists());
    }
}
