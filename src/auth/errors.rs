use axum::http::StatusCode;
use thiserror::Error;

/// A rejected bearer token or missing permission.
///
/// `code` is the machine-readable reason, `description` is what the caller
/// sees in the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub code: &'static str,
    pub description: String,
    pub status: StatusCode,
}

impl AuthError {
    pub fn new(code: &'static str, description: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code,
            description: description.into(),
            status,
        }
    }

    pub fn header_missing() -> Self {
        Self::new(
            "authorization_header_missing",
            "Authorization header is expected.",
            StatusCode::UNAUTHORIZED,
        )
    }

    pub fn invalid_header(description: impl Into<String>) -> Self {
        Self::new("invalid_header", description, StatusCode::UNAUTHORIZED)
    }

    pub fn token_expired() -> Self {
        Self::new("token_expired", "Token expired.", StatusCode::UNAUTHORIZED)
    }

    pub fn invalid_claims(description: impl Into<String>, status: StatusCode) -> Self {
        Self::new("invalid_claims", description, status)
    }

    pub fn unauthorized() -> Self {
        Self::new("unauthorized", "Permission not found.", StatusCode::FORBIDDEN)
    }
}
