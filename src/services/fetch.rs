use crate::services::api::{ApiError, GithubClient, RepositoryRecord};

/// Result of the single repository fetch. Every failure collapses into
/// [`FetchOutcome::Failed`]; the cause only reaches the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(Vec<RepositoryRecord>),
    Failed,
}

/// One attempt, no retry.
pub async fn fetch_repositories(client: &GithubClient, user: &str) -> FetchOutcome {
    match client.list_user_repos(user).await {
        Ok(records) => {
            tracing::info!(user, count = records.len(), "fetched repositories");
            FetchOutcome::Loaded(records)
        }
        Err(err) => {
            log_failure(user, &err);
            FetchOutcome::Failed
        }
    }
}

fn log_failure(user: &str, err: &ApiError) {
    match err {
        ApiError::HttpStatus { status, .. } => tracing::warn!(
            user,
            status = status.as_u16(),
            status_text = err.status_text().unwrap_or("unknown status"),
            "repository listing rejected"
        ),
        other => tracing::warn!(user, error = %other, "repository fetch failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::http::ApiClientConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> GithubClient {
        let config = ApiClientConfig::try_from_url(&server.url("/")).unwrap();
        GithubClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn success_yields_records_in_server_order() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/users/ferris/repos");
            then.status(200).json_body(json!([
                { "name": "newest", "description": "d", "html_url": "https://github.com/ferris/newest" },
                { "name": "older", "description": null, "html_url": "https://github.com/ferris/older" }
            ]));
        });

        match fetch_repositories(&client_for(&server), "ferris").await {
            FetchOutcome::Loaded(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].name, "newest");
                assert_eq!(records[1].name, "older");
            }
            FetchOutcome::Failed => panic!("expected records"),
        }
    }

    #[tokio::test]
    async fn error_status_collapses_to_failed() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/users/ferris/repos");
            then.status(403).body("rate limited");
        });

        assert_eq!(
            fetch_repositories(&client_for(&server), "ferris").await,
            FetchOutcome::Failed
        );
    }

    #[tokio::test]
    async fn unreachable_server_collapses_to_failed() {
        let config = ApiClientConfig::try_from_url("http://127.0.0.1:9/").unwrap();
        let client = GithubClient::new(config).unwrap();
        assert_eq!(fetch_repositories(&client, "ferris").await, FetchOutcome::Failed);
    }
}
