use async_trait::async_trait;

use super::DbError;
use crate::domain::drink::{Drink, DrinkDraft};

/// Repository trait for coffee-shop drinks
#[async_trait]
pub trait DrinkRepository: Send {
    /// All drinks ordered by id
    async fn list(&mut self) -> Result<Vec<Drink>, DbError>;

    /// Find a drink by its ID
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Drink>, DbError>;

    /// Insert a drink, returning the stored row
    async fn insert(&mut self, draft: &DrinkDraft) -> Result<Drink, DbError>;

    /// Overwrite title and recipe of an existing drink
    async fn update(&mut self, drink: &Drink) -> Result<(), DbError>;

    /// Delete by ID; `NotFound` when no row matched
    async fn delete(&mut self, id: i64) -> Result<(), DbError>;

    /// Total number of drinks
    async fn count(&mut self) -> Result<i64, DbError>;
}
