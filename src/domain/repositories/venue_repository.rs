use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::DbError;
use crate::domain::listing::{ListingSummary, Venue, VenueDraft, VenueSummary};

/// Repository trait for venues
///
/// Methods taking `now` count a venue's shows starting after that instant
/// as upcoming.
#[async_trait]
pub trait VenueRepository: Send {
    /// Insert a venue, returning its new ID
    async fn insert(&mut self, draft: &VenueDraft) -> Result<i64, DbError>;

    /// Overwrite an existing venue's fields; `NotFound` when missing
    async fn update(&mut self, id: i64, draft: &VenueDraft) -> Result<(), DbError>;

    /// Find a venue by its ID
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Venue>, DbError>;

    /// Most recently listed venues first
    async fn list_recent(&mut self, limit: i64) -> Result<Vec<Venue>, DbError>;

    /// Every venue with its upcoming show count
    async fn list_summaries(&mut self, now: NaiveDateTime) -> Result<Vec<VenueSummary>, DbError>;

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

    /// Total number of venues
    async fn count(&mut self) -> Result<i64, DbError>;
}
