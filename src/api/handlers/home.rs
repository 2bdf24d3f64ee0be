use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::domain::listing::{Artist, Venue};
use crate::domain::repositories::{ArtistRepository, VenueRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::{SqliteArtistRepository, SqliteVenueRepository};

const RECENT_LISTINGS: i64 = 10;

#[derive(Debug, Serialize)]
pub struct RecentListing {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub image_link: Option<String>,
}

impl From<Venue> for RecentListing {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
            image_link: venue.image_link,
        }
    }
}

impl From<Artist> for RecentListing {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            image_link: artist.image_link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub venues: Vec<RecentListing>,
    pub artists: Vec<RecentListing>,
}

/// Newest venues and artists, most recent first
///
/// GET /
pub async fn index(State(pool): State<DbPool>) -> Result<Json<HomePage>, ApiError> {
    let mut conn = pool.acquire().await?;
    let venues = SqliteVenueRepository::new(&mut conn)
        .list_recent(RECENT_LISTINGS)
        .await?;
    let artists = SqliteArtistRepository::new(&mut conn)
        .list_recent(RECENT_LISTINGS)
        .await?;

    Ok(Json(HomePage {
        venues: venues.into_iter().map(RecentListing::from).collect(),
        artists: artists.into_iter().map(RecentListing::from).collect(),
    }))
}
