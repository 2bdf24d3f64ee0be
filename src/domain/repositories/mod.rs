// Repository contracts (ports)
// Every repository wraps an explicit connection or transaction handle
// supplied by the caller; none of them reach for a global session.

pub mod artist_repository;
pub mod category_repository;
pub mod drink_repository;
pub mod question_repository;
pub mod show_repository;
pub mod venue_repository;

pub use artist_repository::ArtistRepository;
pub use category_repository::CategoryRepository;
pub use drink_repository::DrinkRepository;
pub use question_repository::QuestionRepository;
pub use show_repository::ShowRepository;
pub use venue_repository::VenueRepository;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Persistence failure, split by what the caller can do about it
#[derive(Debug, Error)]
pub enum DbError {
    /// Lookup by primary key matched nothing
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Unique, foreign-key, not-null or check constraint rejected the write
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// Connectivity, decoding, or any other store failure
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return DbError::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        DbError::Sqlx(err)
    }
}
