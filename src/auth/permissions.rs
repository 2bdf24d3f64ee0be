use std::fmt;

use axum::http::StatusCode;

use super::errors::AuthError;
use super::jwt::Claims;

/// Permissions understood by the coffee shop routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    GetDrinksDetail,
    PostDrinks,
    PatchDrinks,
    DeleteDrinks,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::GetDrinksDetail => "get:drinks-detail",
            Permission::PostDrinks => "post:drinks",
            Permission::PatchDrinks => "patch:drinks",
            Permission::DeleteDrinks => "delete:drinks",
        }
    }

    /// Fails closed: a token without a permissions claim is rejected outright.
    pub fn check(&self, claims: &Claims) -> Result<(), AuthError> {
        let granted = claims.permissions.as_ref().ok_or_else(|| {
            AuthError::invalid_claims("Permissions not included in JWT.", StatusCode::BAD_REQUEST)
        })?;

        if granted.iter().any(|p| p == self.as_str()) {
            Ok(())
        } else {
            Err(AuthError::unauthorized())
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_permission_passes() {
        let claims = Claims::new("barista", &["get:drinks-detail"]);
        assert!(Permission::GetDrinksDetail.check(&claims).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let claims = Claims::new("barista", &["get:drinks-detail"]);
        let err = Permission::DeleteDrinks.check(&claims).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.code, "unauthorized");
    }

    #[test]
    fn absent_permissions_claim_is_bad_request() {
        let claims = Claims::new("barista", &[]).without_permissions();
        let err = Permission::PostDrinks.check(&claims).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "invalid_claims");
    }

    #[test]
    fn display_is_wire_name() {
        assert_eq!(Permission::PatchDrinks.to_string(), "patch:drinks");
    }
}
