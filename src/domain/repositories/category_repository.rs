use async_trait::async_trait;

use super::DbError;
use crate::domain::trivia::Category;

/// Repository trait for trivia categories (read-only)
#[async_trait]
pub trait CategoryRepository: Send {
    /// All categories ordered by id
    async fn list(&mut self) -> Result<Vec<Category>, DbError>;
}
