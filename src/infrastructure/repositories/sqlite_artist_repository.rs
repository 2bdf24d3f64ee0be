use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

use crate::domain::listing::{Artist, ArtistDraft, ListingSummary};
use crate::domain::repositories::{ArtistRepository, DbError};
use crate::domain::text::contains_ignoring_case;

/// SQLite implementation of ArtistRepository
pub struct SqliteArtistRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteArtistRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> ArtistRepository for SqliteArtistRepository<'c> {
    async fn insert(&mut self, draft: &ArtistDraft) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO artists (
                name, city, state, phone, genres, seeking_venue,
                seeking_description, website, image_link, facebook_link
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.phone)
        .bind(&draft.genres)
        .bind(draft.seeking_venue)
        .bind(&draft.seeking_description)
        .bind(&draft.website)
        .bind(&draft.image_link)
        .bind(&draft.facebook_link)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    async fn update(&mut self, id: i64, draft: &ArtistDraft) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE artists SET
                name = ?, city = ?, state = ?, phone = ?, genres = ?,
                seeking_venue = ?, seeking_description = ?, website = ?,
                image_link = ?, facebook_link = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.phone)
        .bind(&draft.genres)
        .bind(draft.seeking_venue)
        .bind(&draft.seeking_description)
        .bind(&draft.website)
        .bind(&draft.image_link)
        .bind(&draft.facebook_link)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("artist", id));
        }

        Ok(())
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Artist>, DbError> {
        let row = sqlx::query_as::<_, Artist>(
            r#"
            SELECT id, name, city, state, phone, genres, seeking_venue,
                   seeking_description, website, image_link, facebook_link, created_at
            FROM artists
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    async fn list_recent(&mut self, limit: i64) -> Result<Vec<Artist>, DbError> {
        let rows = sqlx::query_as::<_, Artist>(
            r#"
            SELECT id, name, city, state, phone, genres, seeking_venue,
                   seeking_description, website, image_link, facebook_link, created_at
            FROM artists
            WHERE created_at IS NOT NULL
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    async fn list_summaries(&mut self, now: NaiveDateTime) -> Result<Vec<ListingSummary>, DbError> {
        let rows = sqlx::query_as::<_, ListingSummary>(
            r#"
            SELECT a.id, a.name,
                   COALESCE(SUM(CASE WHEN s.start_time > ? THEN 1 ELSE 0 END), 0) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            GROUP BY a.id
            ORDER BY a.name
            "#,
        )
        .bind(now)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    async fn search_by_name(
        &mut self,
        term: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<ListingSummary>, DbError> {
        let rows = sqlx::query_as::<_, ListingSummary>(
            r#"
            SELECT a.id, a.name,
                   COALESCE(SUM(CASE WHEN s.start_time > ? THEN 1 ELSE 0 END), 0) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            GROUP BY a.id
            ORDER BY a.name
            "#,
        )
        .bind(now)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows
            .into_iter()
            .filter(|row| contains_ignoring_case(&row.name, term))
            .collect())
    }

    async fn search_by_location(
        &mut self,
        city: &str,
        state: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<ListingSummary>, DbError> {
        let rows = sqlx::query_as::<_, ListingSummary>(
            r#"
            SELECT a.id, a.name,
                   COALESCE(SUM(CASE WHEN s.start_time > ? THEN 1 ELSE 0 END), 0) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.city = ? AND a.state = ?
            GROUP BY a.id
            ORDER BY a.name
            "#,
        )
        .bind(now)
        .bind(city)
        .bind(state)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("artist", id));
        }

        Ok(())
    }

    async fn count(&mut self) -> Result<i64, DbError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM artists")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(total)
    }
}
