use async_trait::async_trait;

use super::DbError;
use crate::domain::listing::{NewShow, ShowListing};

/// Repository trait for shows
#[async_trait]
pub trait ShowRepository: Send {
    /// Insert a show, returning its new ID
    async fn insert(&mut self, show: &NewShow) -> Result<i64, DbError>;

    /// Every show joined with its venue and artist, by start time
    async fn list(&mut self) -> Result<Vec<ShowListing>, DbError>;

    /// Shows booked at one venue
    async fn for_venue(&mut self, venue_id: i64) -> Result<Vec<ShowListing>, DbError>;

    /// Shows booked for one artist
    async fn for_artist(&mut self, artist_id: i64) -> Result<Vec<ShowListing>, DbError>;

    /// Total number of shows
    async fn count(&mut self) -> Result<i64, DbError>;
}
