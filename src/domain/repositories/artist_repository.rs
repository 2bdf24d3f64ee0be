use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::DbError;
use crate::domain::listing::{Artist, ArtistDraft, ListingSummary};

/// Repository trait for artists
#[async_trait]
pub trait ArtistRepository: Send {
    /// Insert an artist, returning its new ID
    async fn insert(&mut self, draft: &ArtistDraft) -> Result<i64, DbError>;

    /// Overwrite an existing artist's fields; `NotFound` when missing
    async fn update(&mut self, id: i64, draft: &ArtistDraft) -> Result<(), DbError>;

    /// Find an artist by its ID
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Artist>, DbError>;

    /// Most recently listed artists first
    async fn list_recent(&mut self, limit: i64) -> Result<Vec<Artist>, DbError>;

    /// Every artist with its upcoming show count, ordered by name
    async fn list_summaries(&mut self, now: NaiveDateTime) -> Result<Vec<ListingSummary>, DbError>;

    /// Case-insensitive substring match on the name
    async fn search_by_name(
        &mut self,
        term: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<ListingSummary>, DbError>;

    /// Exact match on city and state
    async fn search_by_location(
        &mut self,
        city: &str,
        state: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<ListingSummary>, DbError>;

    /// Delete by ID; `NotFound` when no row matched
    async fn delete(&mut self, id: i64) -> Result<(), DbError>;

    /// Total number of artists
    async fn count(&mut self) -> Result<i64, DbError>;
}
