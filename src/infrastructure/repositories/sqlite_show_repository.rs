use async_trait::async_trait;
use sqlx::SqliteConnection;

use crate::domain::listing::{NewShow, ShowListing};
use crate::domain::repositories::{DbError, ShowRepository};

/// SQLite implementation of ShowRepository
pub struct SqliteShowRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteShowRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> ShowRepository for SqliteShowRepository<'c> {
    async fn insert(&mut self, show: &NewShow) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    async fn list(&mut self) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as::<_, ShowListing>(
            r#"
            SELECT s.id AS show_id, s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
                   s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time, s.id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    async fn for_venue(&mut self, venue_id: i64) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as::<_, ShowListing>(
            r#"
            SELECT s.id AS show_id, s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
                   s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    async fn for_artist(&mut self, artist_id: i64) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as::<_, ShowListing>(
            r#"
            SELECT s.id AS show_id, s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
                   s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            WHERE s.artist_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(artist_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    async fn count(&mut self) -> Result<i64, DbError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shows")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(total)
    }
}
