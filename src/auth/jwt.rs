// JWT token creation and verification
// HS256 bearer tokens carrying a subject and a permissions list

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (the caller's identity at the token issuer)
/// * `exp` - Expiry time (seconds since epoch)
/// * `aud` - Audience, checked only when the verifier is configured with one
/// * `permissions` - Granted permission strings such as `post:drinks`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Claims for `sub` holding `permissions`, valid for 8 hours.
    pub fn new(sub: impl Into<String>, permissions: &[&str]) -> Self {
        let expiry = Utc::now() + Duration::hours(8);
        Self {
            sub: sub.into(),
            exp: expiry.timestamp() as usize,
            aud: None,
            permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.aud = Some(audience.into());
        self
    }

    pub fn expiring_at(mut self, exp: usize) -> Self {
        self.exp = exp;
        self
    }

    pub fn without_permissions(mut self) -> Self {
        self.permissions = None;
        self
    }
}

/// Signs claims into a token
///
/// # Example
/// ```
/// use fullstack_api::auth::jwt::{create_token, verify_token, Claims};
///
/// let secret = "your-secret-key";
/// let token = create_token(&Claims::new("barista", &["get:drinks-detail"]), secret).unwrap();
///
/// let claims = verify_token(&token, secret, None).expect("valid token");
/// assert_eq!(claims.sub, "barista");
/// ```
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

/// Verifies and decodes a token
///
/// Expired tokens map to `token_expired`, an audience mismatch to
/// `invalid_claims`, and anything else that fails to decode to
/// `invalid_header`.
pub fn verify_token(token: &str, secret: &str, audience: Option<&str>) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    match audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_ref()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::token_expired(),
            ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::invalid_claims(
                "Incorrect claims. Please, check the audience and issuer.",
                StatusCode::UNAUTHORIZED,
            ),
            _ => {
                tracing::debug!(error = %e, "token rejected");
                AuthError::invalid_header("Unable to parse authentication token.")
            }
        })
}

/// Turns a raw bearer token into verified claims.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Verifies HS256 tokens against a shared secret.
#[derive(Debug, Clone)]
pub struct JwtVerifier {
    secret: String,
    audience: Option<String>,
}

impl JwtVerifier {
    pub fn new(secret: impl Into<String>, audience: Option<String>) -> Self {
        Self {
            secret: secret.into(),
            audience,
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        verify_token(token, &self.secret, self.audience.as_deref())
    }
}
