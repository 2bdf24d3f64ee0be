use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Serialize;

use super::shows::ArtistAppearance;
use crate::api::errors::ApiError;
use crate::api::extractors::EntityId;
use crate::api::forms::{DeleteOutcome, Flash, FlashResponse, FormFields};
use crate::domain::listing::venue::group_by_area;
use crate::domain::listing::{Area, ListingSummary, SearchTerm, ShowSplit, VenueDraft};
use crate::domain::repositories::{DbError, ShowRepository, VenueRepository};
use crate::infrastructure::db::{self, DbPool};
use crate::infrastructure::repositories::{SqliteShowRepository, SqliteVenueRepository};

#[derive(Debug, Serialize)]
pub struct VenuesPage {
    pub areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<ListingSummary>,
}

/// Venue page model
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Venues grouped by (city, state)
///
/// GET /venues
pub async fn list_venues(State(pool): State<DbPool>) -> Result<Json<VenuesPage>, ApiError> {
    let now = Local::now().naive_local();

    let mut conn = pool.acquire().await?;
    let summaries = SqliteVenueRepository::new(&mut conn)
        .list_summaries(now)
        .await?;

    Ok(Json(VenuesPage {
        areas: group_by_area(summaries),
    }))
}

/// POST /venues/search
pub async fn search_venues(
    State(pool): State<DbPool>,
    form: FormFields,
) -> Result<Json<SearchResults>, ApiError> {
    let search_term = form.get("search_term").unwrap_or_default().to_string();
    let now = Local::now().naive_local();

    let mut conn = pool.acquire().await?;
    let mut repo = SqliteVenueRepository::new(&mut conn);
    let data = match SearchTerm::parse(&search_term) {
        SearchTerm::Location { city, state } => repo.search_by_location(&city, &state, now).await?,
        SearchTerm::Name(name) => repo.search_by_name(&name, now).await?,
    };

    Ok(Json(SearchResults {
        search_term,
        count: data.len(),
        data,
    }))
}

/// GET /venues/:id
pub async fn show_venue(
    State(pool): State<DbPool>,
    EntityId(id): EntityId,
) -> Result<Json<VenueDetail>, ApiError> {
    let mut conn = pool.acquire().await?;
    let venue = SqliteVenueRepository::new(&mut conn)
        .find_by_id(id)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;
    let shows = SqliteShowRepository::new(&mut conn).for_venue(id).await?;

    let split = ShowSplit::around(shows, Local::now().naive_local());

    Ok(Json(VenueDetail {
        genres: venue.genre_list(),
        id: venue.id,
        name: venue.name,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent.unwrap_or(false),
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: split.past.len(),
        upcoming_shows_count: split.upcoming.len(),
        past_shows: split.past.iter().map(ArtistAppearance::from).collect(),
        upcoming_shows: split.upcoming.iter().map(ArtistAppearance::from).collect(),
    }))
}

/// POST /venues/create
pub async fn create_venue(State(pool): State<DbPool>, form: FormFields) -> Json<FlashResponse> {
    let draft = form.venue_draft();
    let name = draft.name.clone();
    let outcome = insert_venue(&pool, draft).await;

    Json(FlashResponse::from_outcome(
        &outcome,
        || format!("Venue {} was successfully listed!", name),
        || format!("An error occurred. Venue {} could not be listed.", name),
    ))
}

/// Applies the submitted fields, then sends the browser back to the venue page
///
/// POST /venues/:id/edit
pub async fn edit_venue(
    State(pool): State<DbPool>,
    EntityId(id): EntityId,
    form: FormFields,
) -> impl IntoResponse {
    let name = form.required("name");
    let outcome = update_venue(&pool, id, &form).await;

    let body = FlashResponse::from_outcome(
        &outcome,
        || format!("Venue {} was successfully updated!", name),
        || format!("An error occurred. Venue {} could not be updated.", name),
    );

    (
        StatusCode::SEE_OTHER,
        [(LOCATION, format!("/venues/{}", id))],
        Json(body),
    )
}

/// DELETE /venues/:id
pub async fn delete_venue(State(pool): State<DbPool>, EntityId(id): EntityId) -> Json<DeleteOutcome> {
    let outcome = remove_venue(&pool, id).await;

    Json(match outcome {
        Ok(()) => DeleteOutcome {
            success: true,
            flash: None,
        },
        Err(err) => {
            tracing::warn!(venue_id = id, error = %err, "venue delete failed");
            DeleteOutcome {
                success: false,
                flash: Some(Flash::error("An error occurred deleting a Venue!")),
            }
        }
    })
}

async fn insert_venue(pool: &DbPool, draft: VenueDraft) -> Result<i64, ApiError> {
    let draft = draft.validate()?;

    let mut tx = pool.begin().await?;
    let result = SqliteVenueRepository::new(&mut tx).insert(&draft).await;
    let id = db::finish(tx, result).await?;

    tracing::info!(venue_id = id, "venue listed");
    Ok(id)
}

async fn update_venue(pool: &DbPool, id: i64, form: &FormFields) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;
    let result = async {
        let mut repo = SqliteVenueRepository::new(&mut tx);
        let current = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))?;
        let draft = form.venue_edit(current.into()).validate()?;
        repo.update(id, &draft).await?;
        Ok::<_, ApiError>(())
    }
    .await;
    db::finish(tx, result).await?;

    tracing::info!(venue_id = id, "venue updated");
    Ok(())
}

async fn remove_venue(pool: &DbPool, id: i64) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;
    let result = SqliteVenueRepository::new(&mut tx).delete(id).await;
    db::finish(tx, result).await?;

    tracing::info!(venue_id = id, "venue deleted");
    Ok(())
}
