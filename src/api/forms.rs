// Form-encoded bodies for the listings app

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use serde::Serialize;

use super::errors::ApiError;
use crate::domain::listing::genres::join_genres;
use crate::domain::listing::{ArtistDraft, VenueDraft};
use crate::domain::validation::optional_text;

/// Every `key=value` pair of a form body, in submission order.
///
/// Multi-selects such as `genres` repeat their key once per choice.
#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `key`, empty when absent; drafts reject the blanks.
    pub fn required(&self, key: &str) -> String {
        self.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    pub fn optional(&self, key: &str) -> Option<String> {
        optional_text(self.get(key).map(str::to_string))
    }

    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .collect()
    }

    /// Checkbox semantics: present and not an explicit "off" value.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(v) => !matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "" | "n" | "no" | "false" | "0" | "off"
            ),
            None => false,
        }
    }

    fn text_or(&self, key: &str, current: String) -> String {
        match self.get(key) {
            Some(_) => self.required(key),
            None => current,
        }
    }

    fn optional_or(&self, key: &str, current: Option<String>) -> Option<String> {
        match self.get(key) {
            Some(_) => self.optional(key),
            None => current,
        }
    }

    fn flag_or(&self, key: &str, current: bool) -> bool {
        match self.get(key) {
            Some(_) => self.flag(key),
            None => current,
        }
    }

    fn genres_or(&self, current: String) -> String {
        let genres = self.all("genres");
        if genres.is_empty() {
            current
        } else {
            join_genres(&genres)
        }
    }

    /// Lays the submitted keys over `current`; keys the form omits keep their stored value.
    pub fn venue_edit(&self, current: VenueDraft) -> VenueDraft {
        VenueDraft {
            name: self.text_or("name", current.name),
            genres: self.genres_or(current.genres),
            city: self.text_or("city", current.city),
            state: self.text_or("state", current.state),
            address: self.text_or("address", current.address),
            phone: self.optional_or("phone", current.phone),
            seeking_talent: self.flag_or("seeking_talent", current.seeking_talent),
            seeking_description: self.optional_or("seeking_description", current.seeking_description),
            website: self.optional_or("website", current.website),
            image_link: self.optional_or("image_link", current.image_link),
            facebook_link: self.optional_or("facebook_link", current.facebook_link),
        }
    }

    pub fn artist_edit(&self, current: ArtistDraft) -> ArtistDraft {
        ArtistDraft {
            name: self.text_or("name", current.name),
            city: self.text_or("city", current.city),
            state: self.text_or("state", current.state),
            phone: self.optional_or("phone", current.phone),
            genres: self.genres_or(current.genres),
            seeking_venue: self.flag_or("seeking_venue", current.seeking_venue),
            seeking_description: self.optional_or("seeking_description", current.seeking_description),
            website: self.optional_or("website", current.website),
            image_link: self.optional_or("image_link", current.image_link),
            facebook_link: self.optional_or("facebook_link", current.facebook_link),
        }
    }

    pub fn venue_draft(&self) -> VenueDraft {
        VenueDraft {
            name: self.required("name"),
            genres: join_genres(&self.all("genres")),
            city: self.required("city"),
            state: self.required("state"),
            address: self.required("address"),
            phone: self.optional("phone"),
            seeking_talent: self.flag("seeking_talent"),
            seeking_description: self.optional("seeking_description"),
            website: self.optional("website"),
            image_link: self.optional("image_link"),
            facebook_link: self.optional("facebook_link"),
        }
    }

    pub fn artist_draft(&self) -> ArtistDraft {
        ArtistDraft {
            name: self.required("name"),
            city: self.required("city"),
            state: self.required("state"),
            phone: self.optional("phone"),
            genres: join_genres(&self.all("genres")),
            seeking_venue: self.flag("seeking_venue"),
            seeking_description: self.optional("seeking_description"),
            website: self.optional("website"),
            image_link: self.optional("image_link"),
            facebook_link: self.optional("facebook_link"),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| ApiError::ValidationFailed(e.body_text()))?;
        Ok(Self(pairs))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Error,
}

/// One-shot message the listings pages show after a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }
}

/// `{"success": bool, "flash": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct FlashResponse {
    pub success: bool,
    pub flash: Flash,
}

impl FlashResponse {
    pub fn from_outcome<T, E: std::fmt::Display>(
        outcome: &Result<T, E>,
        on_success: impl FnOnce() -> String,
        on_error: impl FnOnce() -> String,
    ) -> Self {
        match outcome {
            Ok(_) => Self {
                success: true,
                flash: Flash::success(on_success()),
            },
            Err(err) => {
                tracing::warn!(error = %err, "listing mutation failed");
                Self {
                    success: false,
                    flash: Flash::error(on_error()),
                }
            }
        }
    }
}

/// Body of the listings DELETE routes
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}
