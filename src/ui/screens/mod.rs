mod detail;
mod error;
mod home;
mod listing;
mod search;

pub use detail::{DetailAction, DetailScreen};
pub use error::{ErrorAction, ErrorScreen};
pub use home::{HomeAction, HomeScreen};
pub use listing::{ListingAction, ListingScreen};
pub use search::{SearchAction, SearchScreen};
