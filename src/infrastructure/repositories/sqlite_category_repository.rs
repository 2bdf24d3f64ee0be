use async_trait::async_trait;
use sqlx::SqliteConnection;

use crate::domain::repositories::{CategoryRepository, DbError};
use crate::domain::trivia::Category;

/// SQLite implementation of CategoryRepository
pub struct SqliteCategoryRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteCategoryRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> CategoryRepository for SqliteCategoryRepository<'c> {
    async fn list(&mut self) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(categories)
    }
}
