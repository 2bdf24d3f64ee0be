use thiserror::Error;

/// Presence/shape failure for an incoming field
///
/// Only presence and parseability are checked; formats such as phone
/// numbers or genre vocabularies are accepted as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field absent or blank
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// Field present but unusable
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::Missing { field }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Returns the trimmed value, or `Missing` when absent or blank
pub fn require_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ValidationError::missing(field)),
    }
}

/// Blank strings collapse to `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
