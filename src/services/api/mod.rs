pub mod github;
pub mod http;

pub use github::{GithubClient, RepositoryRecord};
pub use http::ApiError;
