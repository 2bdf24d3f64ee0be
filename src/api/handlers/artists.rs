use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Serialize;

use super::shows::VenueAppearance;
use super::venues::SearchResults;
use crate::api::errors::ApiError;
use crate::api::extractors::EntityId;
use crate::api::forms::{DeleteOutcome, Flash, FlashResponse, FormFields};
use crate::domain::listing::{ArtistDraft, ListingSummary, SearchTerm, ShowSplit};
use crate::domain::repositories::{ArtistRepository, DbError, ShowRepository};
use crate::infrastructure::db::{self, DbPool};
use crate::infrastructure::repositories::{SqliteArtistRepository, SqliteShowRepository};

#[derive(Debug, Serialize)]
pub struct ArtistsPage {
    pub artists: Vec<ListingSummary>,
}

/// Artist page model
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /artists
pub async fn list_artists(State(pool): State<DbPool>) -> Result<Json<ArtistsPage>, ApiError> {
    let now = Local::now().naive_local();

    let mut conn = pool.acquire().await?;
    let artists = SqliteArtistRepository::new(&mut conn)
        .list_summaries(now)
        .await?;

    Ok(Json(ArtistsPage { artists }))
}

/// POST /artists/search
pub async fn search_artists(
    State(pool): State<DbPool>,
    form: FormFields,
) -> Result<Json<SearchResults>, ApiError> {
    let search_term = form.get("search_term").unwrap_or_default().to_string();
    let now = Local::now().naive_local();

    let mut conn = pool.acquire().await?;
    let mut repo = SqliteArtistRepository::new(&mut conn);
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

/// GET /artists/:id
pub async fn show_artist(
    State(pool): State<DbPool>,
    EntityId(id): EntityId,
) -> Result<Json<ArtistDetail>, ApiError> {
    let mut conn = pool.acquire().await?;
    let artist = SqliteArtistRepository::new(&mut conn)
        .find_by_id(id)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;
    let shows = SqliteShowRepository::new(&mut conn).for_artist(id).await?;

    let split = ShowSplit::around(shows, Local::now().naive_local());

    Ok(Json(ArtistDetail {
        genres: artist.genre_list(),
        id: artist.id,
        name: artist.name,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue.unwrap_or(false),
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: split.past.len(),
        upcoming_shows_count: split.upcoming.len(),
        past_shows: split.past.iter().map(VenueAppearance::from).collect(),
        upcoming_shows: split.upcoming.iter().map(VenueAppearance::from).collect(),
    }))
}

/// POST /artists/create
pub async fn create_artist(State(pool): State<DbPool>, form: FormFields) -> Json<FlashResponse> {
    let draft = form.artist_draft();
    let name = draft.name.clone();
    let outcome = insert_artist(&pool, draft).await;

    Json(FlashResponse::from_outcome(
        &outcome,
        || format!("Artist {} was successfully listed!", name),
        || format!("An error occurred. Artist {} could not be listed.", name),
    ))
}

/// POST /artists/:id/edit
pub async fn edit_artist(
    State(pool): State<DbPool>,
    EntityId(id): EntityId,
    form: FormFields,
) -> impl IntoResponse {
    let name = form.required("name");
    let outcome = update_artist(&pool, id, &form).await;

    let body = FlashResponse::from_outcome(
        &outcome,
        || format!("Artist {} was successfully updated!", name),
        || format!("An error occurred. Artist {} could not be updated.", name),
    );

    (
        StatusCode::SEE_OTHER,
        [(LOCATION, format!("/artists/{}", id))],
        Json(body),
    )
}

/// DELETE /artists/:id
pub async fn delete_artist(State(pool): State<DbPool>, EntityId(id): EntityId) -> Json<DeleteOutcome> {
    match remove_artist(&pool, id).await {
        Ok(()) => Json(DeleteOutcome {
            success: true,
            flash: None,
        }),
        Err(err) => {
            tracing::warn!(artist_id = id, error = %err, "artist delete failed");
            Json(DeleteOutcome {
                success: false,
                flash: Some(Flash::error("An error occurred deleting a Artist!")),
            })
        }
    }
}

async fn insert_artist(pool: &DbPool, draft: ArtistDraft) -> Result<i64, ApiError> {
    let draft = draft.validate()?;

    let mut tx = pool.begin().await?;
    let result = SqliteArtistRepository::new(&mut tx).insert(&draft).await;
    let id = db::finish(tx, result).await?;

    tracing::info!(artist_id = id, "artist listed");
    Ok(id)
}

async fn update_artist(pool: &DbPool, id: i64, form: &FormFields) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;
    let result = async {
        let mut repo = SqliteArtistRepository::new(&mut tx);
        let current = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("artist", id))?;
        let draft = form.artist_edit(current.into()).validate()?;
        repo.update(id, &draft).await?;
        Ok::<_, ApiError>(())
    }
    .await;
    db::finish(tx, result).await?;

    tracing::info!(artist_id = id, "artist updated");
    Ok(())
}

async fn remove_artist(pool: &DbPool, id: i64) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;
    let result = SqliteArtistRepository::new(&mut tx).delete(id).await;
    db::finish(tx, result).await?;

    tracing::info!(artist_id = id, "artist deleted");
    Ok(())
}
