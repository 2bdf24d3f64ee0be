// Infrastructure layer module
// SQLite connection management and the repository adapters built on it

pub mod db;
pub mod repositories;
