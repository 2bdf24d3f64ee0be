// HTTP handlers, one module per resource

pub mod artists;
pub mod drinks;
pub mod home;
pub mod shows;
pub mod trivia;
pub mod venues;
