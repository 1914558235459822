//! View models
//!
//! Presentation data computed from state, so widgets only draw.

mod repository_card;
mod status_bar;

pub use repository_card::RepositoryCardViewModel;
pub use status_bar::StatusBarViewModel;
