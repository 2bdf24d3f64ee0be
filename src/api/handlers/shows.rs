use axum::{extract::State, Json};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::forms::{FlashResponse, FormFields};
use crate::domain::listing::{NewShow, ShowListing};
use crate::domain::repositories::ShowRepository;
use crate::infrastructure::db::{self, DbPool};
use crate::infrastructure::repositories::SqliteShowRepository;

/// Wall-clock start time as `YYYY-MM-DDTHH:MM:SS`
pub fn format_start_time(start_time: NaiveDateTime) -> String {
    start_time.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// A show as listed on the shows page
#[derive(Debug, Serialize)]
pub struct ShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowListing> for ShowEntry {
    fn from(show: &ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: format_start_time(show.start_time),
        }
    }
}

/// A show as seen from the venue page
#[derive(Debug, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowListing> for ArtistAppearance {
    fn from(show: &ShowListing) -> Self {
        Self {
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: format_start_time(show.start_time),
        }
    }
}

/// A show as seen from the artist page
#[derive(Debug, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowListing> for VenueAppearance {
    fn from(show: &ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            venue_image_link: show.venue_image_link.clone(),
            start_time: format_start_time(show.start_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowsPage {
    pub shows: Vec<ShowEntry>,
}

/// GET /shows
pub async fn list_shows(State(pool): State<DbPool>) -> Result<Json<ShowsPage>, ApiError> {
    let mut conn = pool.acquire().await?;
    let shows = SqliteShowRepository::new(&mut conn).list().await?;

    Ok(Json(ShowsPage {
        shows: shows.iter().map(ShowEntry::from).collect(),
    }))
}

/// Book an artist at a venue
///
/// POST /shows/create
pub async fn create_show(State(pool): State<DbPool>, form: FormFields) -> Json<FlashResponse> {
    let outcome = insert_show(&pool, &form).await;

    Json(FlashResponse::from_outcome(
        &outcome,
        || "Show was successfully listed!".to_string(),
        || "An error occurred. Show could not be listed.".to_string(),
    ))
}

async fn insert_show(pool: &DbPool, form: &FormFields) -> Result<i64, ApiError> {
    let show = NewShow::parse(
        &form.required("venue_id"),
        &form.required("artist_id"),
        &form.required("start_time"),
    )?;

    let mut tx = pool.begin().await?;
    let result = SqliteShowRepository::new(&mut tx).insert(&show).await;
    let id = db::finish(tx, result).await?;

    tracing::info!(
        show_id = id,
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        "show listed"
    );
    Ok(id)
}
