use chrono::NaiveDateTime;

use super::genres::split_genres;
use crate::domain::validation::ValidationError;

/// Persisted artist row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Artist {
    pub fn genre_list(&self) -> Vec<String> {
        split_genres(&self.genres)
    }
}

/// Field values for creating or editing an artist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistDraft {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
}

impl From<Artist> for ArtistDraft {
    fn from(artist: Artist) -> Self {
        Self {
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            genres: artist.genres,
            seeking_venue: artist.seeking_venue.unwrap_or(false),
            seeking_description: artist.seeking_description,
            website: artist.website,
            image_link: artist.image_link,
            facebook_link: artist.facebook_link,
        }
    }
}

impl ArtistDraft {
    pub fn validate(self) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("city", &self.city),
            ("state", &self.state),
            ("genres", &self.genres),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::missing(field));
            }
        }
        Ok(self)
    }
}
