use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::errors::ApiError;
use crate::auth::{AuthError, Permission, TokenVerifier};

/// State of one protected route: who verifies tokens and what they must grant
#[derive(Clone)]
pub struct PermissionGate {
    verifier: Arc<dyn TokenVerifier>,
    permission: Permission,
}

impl PermissionGate {
    pub fn new(verifier: Arc<dyn TokenVerifier>, permission: Permission) -> Self {
        Self {
            verifier,
            permission,
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(AuthError::header_missing)?
        .to_str()
        .map_err(|_| AuthError::invalid_header("Authorization header must be bearer token."))?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::invalid_header("Authorization header must start with \"Bearer\"."),
        ),
        (Some(_), None, _) => Err(AuthError::invalid_header("Token not found.")),
        _ => Err(AuthError::invalid_header(
            "Authorization header must be bearer token.",
        )),
    }
}

/// Rejects the request unless it carries a valid token granting the gate's
/// permission. The verified claims are handed on as a request extension.
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;
    let claims = gate.verifier.verify(token)?;
    gate.permission.check(&claims)?;

    tracing::debug!(sub = %claims.sub, permission = %gate.permission, "permission granted");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
