// Authentication adapters
// Bearer token verification and the permission check for protected routes

pub mod errors;
pub mod jwt;
pub mod permissions;

pub use errors::AuthError;
pub use jwt::{Claims, JwtVerifier, TokenVerifier};
pub use permissions::Permission;
