use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

use crate::domain::listing::{ListingSummary, Venue, VenueDraft, VenueSummary};
use crate::domain::repositories::{DbError, VenueRepository};
use crate::domain::text::contains_ignoring_case;

/// SQLite implementation of VenueRepository
pub struct SqliteVenueRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteVenueRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> VenueRepository for SqliteVenueRepository<'c> {
    async fn insert(&mut self, draft: &VenueDraft) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO venues (
                name, genres, city, state, address, phone, seeking_talent,
                seeking_description, website, image_link, facebook_link
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.genres)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.address)
        .bind(&draft.phone)
        .bind(draft.seeking_talent)
        .bind(&draft.seeking_description)
        .bind(&draft.website)
        .bind(&draft.image_link)
        .bind(&draft.facebook_link)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    async fn update(&mut self, id: i64, draft: &VenueDraft) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE venues SET
                name = ?, genres = ?, city = ?, state = ?, address = ?, phone = ?,
                seeking_talent = ?, seeking_description = ?, website = ?,
                image_link = ?, facebook_link = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.genres)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.address)
        .bind(&draft.phone)
        .bind(draft.seeking_talent)
        .bind(&draft.seeking_description)
        .bind(&draft.website)
        .bind(&draft.image_link)
        .bind(&draft.facebook_link)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("venue", id));
        }

        Ok(())
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Venue>, DbError> {
        let row = sqlx::query_as::<_, Venue>(
            r#"
            SELECT id, name, genres, city, state, address, phone, seeking_talent,
                   seeking_description, website, image_link, facebook_link, created_at
            FROM venues
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    async fn list_recent(&mut self, limit: i64) -> Result<Vec<Venue>, DbError> {
        let rows = sqlx::query_as::<_, Venue>(
            r#"
            SELECT id, name, genres, city, state, address, phone, seeking_talent,
                   seeking_description, website, image_link, facebook_link, created_at
            FROM venues
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

    async fn list_summaries(&mut self, now: NaiveDateTime) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query_as::<_, VenueSummary>(
            r#"
            SELECT v.id, v.name, v.city, v.state,
                   COALESCE(SUM(CASE WHEN s.start_time > ? THEN 1 ELSE 0 END), 0) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.city, v.state, v.name
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
            SELECT v.id, v.name,
                   COALESCE(SUM(CASE WHEN s.start_time > ? THEN 1 ELSE 0 END), 0) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.name
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
            SELECT v.id, v.name,
                   COALESCE(SUM(CASE WHEN s.start_time > ? THEN 1 ELSE 0 END), 0) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.city = ? AND v.state = ?
            GROUP BY v.id
            ORDER BY v.name
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
        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("venue", id));
        }

        Ok(())
    }

    async fn count(&mut self) -> Result<i64, DbError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM venues")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(total)
    }
}
