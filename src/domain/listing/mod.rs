// Listing domain module
// Venues, artists, and the shows that book one onto the other

pub mod artist;
pub mod genres;
pub mod search;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistDraft};
pub use search::SearchTerm;
pub use show::{NewShow, ShowListing, ShowSplit};
pub use venue::{Area, ListingSummary, Venue, VenueDraft, VenueSummary};
