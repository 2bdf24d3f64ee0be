//! Fullstack API Library
//!
//! Three small JSON backends sharing one SQLite store: a venue/artist/show
//! listings app, a trivia API and a permission-gated coffee shop API.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
