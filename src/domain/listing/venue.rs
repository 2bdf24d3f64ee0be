use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::genres::split_genres;
use crate::domain::validation::ValidationError;

/// Persisted venue row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub genres: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Venue {
    pub fn genre_list(&self) -> Vec<String> {
        split_genres(&self.genres)
    }
}

/// Field values for creating or editing a venue
///
/// Genres are already joined into the stored comma-separated form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueDraft {
    pub name: String,
    pub genres: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
}

impl From<Venue> for VenueDraft {
    fn from(venue: Venue) -> Self {
        Self {
            name: venue.name,
            genres: venue.genres,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            seeking_talent: venue.seeking_talent.unwrap_or(false),
            seeking_description: venue.seeking_description,
            website: venue.website,
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
        }
    }
}

impl VenueDraft {
    /// Presence check for the non-nullable columns
    pub fn validate(self) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("genres", &self.genres),
            ("city", &self.city),
            ("state", &self.state),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::missing(field));
            }
        }
        Ok(self)
    }
}

/// Venue with its upcoming show count, for the area listing
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Name plus upcoming show count, used by listings and search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ListingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// All venues in one city/state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummary>,
}

/// Groups venues by (city, state), ordered by city then state
pub fn group_by_area(venues: Vec<VenueSummary>) -> Vec<Area> {
    let mut areas: BTreeMap<(String, String), Vec<ListingSummary>> = BTreeMap::new();

    for venue in venues {
        areas
            .entry((venue.city, venue.state))
            .or_default()
            .push(ListingSummary {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows: venue.num_upcoming_shows,
            });
    }

    areas
        .into_iter()
        .map(|((city, state), venues)| Area { city, state, venues })
        .collect()
}
