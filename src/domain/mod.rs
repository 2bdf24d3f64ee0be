// Domain layer module exports
// Entities, validated drafts and the repository contracts they persist through.
// Independent of HTTP concerns.

pub mod drink;
pub mod listing;
pub mod pagination;
pub mod repositories;
pub mod text;
pub mod trivia;
pub mod validation;

pub use validation::ValidationError;
