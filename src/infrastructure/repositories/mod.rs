// Repository implementations (data access layer)
// SQLite adapters for the domain repository traits. Each one borrows the
// connection or transaction it is handed for the duration of its use.

pub mod sqlite_artist_repository;
pub mod sqlite_category_repository;
pub mod sqlite_drink_repository;
pub mod sqlite_question_repository;
pub mod sqlite_show_repository;
pub mod sqlite_venue_repository;

pub use sqlite_artist_repository::SqliteArtistRepository;
pub use sqlite_category_repository::SqliteCategoryRepository;
pub use sqlite_drink_repository::SqliteDrinkRepository;
pub use sqlite_question_repository::SqliteQuestionRepository;
pub use sqlite_show_repository::SqliteShowRepository;
pub use sqlite_venue_repository::SqliteVenueRepository;
