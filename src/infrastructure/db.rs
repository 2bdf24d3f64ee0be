// Connection pool, embedded migrations and the per-request unit of work

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

pub type DbPool = SqlitePool;

/// Opens the pool at `database_url` and applies pending migrations
///
/// # Example
/// ```ignore
/// let pool = connect("sqlite://fullstack.db?mode=rwc", 5).await?;
/// ```
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    tracing::info!(url = %database_url, "database ready");
    Ok(pool)
}

/// Single-connection in-memory database with migrations applied
///
/// Every pooled connection to `:memory:` would be its own database, so the
/// pool is pinned to one connection that never expires.
pub async fn connect_in_memory() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Runs the migrations embedded from `migrations/`
pub async fn migrate(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))
}

/// Commits when `result` is `Ok`, rolls back otherwise
///
/// Consumes the transaction, so its connection goes back to the pool on
/// every path.
pub async fn finish<T, E>(tx: Transaction<'_, Sqlite>, result: Result<T, E>) -> Result<T, E>
where
    E: From<sqlx::Error> + std::fmt::Display,
{
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "rolling back transaction");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::DbError;

    #[tokio::test]
    async fn in_memory_database_is_migrated_and_seeded() {
        let pool = connect_in_memory().await.expect("in-memory pool");

        let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&pool)
            .await
            .expect("count categories");

        assert_eq!(categories, 6);
    }

    #[tokio::test]
    async fn finish_commits_on_success() {
        let pool = connect_in_memory().await.expect("in-memory pool");

        let mut tx = pool.begin().await.expect("begin");
        let result = sqlx::query("INSERT INTO drinks (title, recipe) VALUES ('water', '[]')")
            .execute(&mut *tx)
            .await
            .map(|_| ())
            .map_err(DbError::from);
        finish(tx, result).await.expect("commit");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drinks")
            .fetch_one(&pool)
            .await
            .expect("count drinks");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn finish_rolls_back_on_error() {
        let pool = connect_in_memory().await.expect("in-memory pool");

        let mut tx = pool.begin().await.expect("begin");
        sqlx::query("INSERT INTO drinks (title, recipe) VALUES ('water', '[]')")
            .execute(&mut *tx)
            .await
            .expect("insert inside transaction");

        let failed: Result<(), DbError> = Err(DbError::not_found("drink", 99));
        let result = finish(tx, failed).await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drinks")
            .fetch_one(&pool)
            .await
            .expect("count drinks");
        assert_eq!(count, 0);
    }
}
