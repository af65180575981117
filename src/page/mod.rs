mod filter;
mod projects;
mod theme_toggle;

pub use filter::ProjectFilter;
pub use projects::{static_cards, Card, Listing, ProjectRenderer};
pub use theme_toggle::ThemeToggler;
