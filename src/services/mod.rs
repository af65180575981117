pub mod api;
pub mod fetch;

pub use fetch::{fetch_repositories, FetchOutcome};
