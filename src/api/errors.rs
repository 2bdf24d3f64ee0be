use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::domain::repositories::DbError;
use crate::domain::ValidationError;

/// API error type rendered as the JSON error envelope
///
/// The variant picks the status and the fixed envelope message. The carried
/// detail is logged, never sent to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationFailed(_) | ApiError::ConstraintViolation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(err) => err.status,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::NotFound(_) => "resource not found".to_string(),
            ApiError::ValidationFailed(_) | ApiError::ConstraintViolation(_) => {
                "unprocessable".to_string()
            }
            ApiError::MethodNotAllowed => "method not allowed".to_string(),
            ApiError::Internal(_) => "Internal Server Error".to_string(),
            ApiError::Auth(err) => err.description.clone(),
        }
    }
}

/// `{"success": false, "error": <status>, "message": <message>}`
pub fn envelope(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({
        "success": false,
        "error": status.as_u16(),
        "message": message,
    }));

    (status, body).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        envelope(status, &self.message())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::Constraint(detail) => ApiError::ConstraintViolation(detail),
            DbError::Sqlx(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        DbError::from(err).into()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::ValidationFailed(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationFailed(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let response = ApiError::not_found("question 9 not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"success": false, "error": 404, "message": "resource not found"})
        );
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let response = ApiError::Internal("disk I/O error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn auth_error_uses_its_own_status() {
        let response = ApiError::from(AuthError::unauthorized()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["error"], 403);
        assert_eq!(body["message"], "Permission not found.");
    }

    #[test]
    fn db_errors_map_by_kind() {
        let missing = ApiError::from(DbError::not_found("drink", 3));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let constraint = ApiError::from(DbError::Constraint("UNIQUE".to_string()));
        assert_eq!(constraint.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal = ApiError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_is_unprocessable() {
        let err = ApiError::from(ValidationError::missing("answer"));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
