use super::http::{ApiClientConfig, ApiError, AuthContext, HttpClient};
use crate::config::AppConfig;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct GithubClient {
    http: Arc<HttpClient>,
    auth: Option<AuthContext>,
}

impl GithubClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: Arc::new(HttpClient::new(config)?),
            auth: None,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let mut api_config = ApiClientConfig::try_from_url(&config.github_api_base_url)?;
        if let Some(secs) = config.request_timeout_secs {
            api_config = api_config.with_timeout(Duration::from_secs(secs));
        }
        let client = Self::new(api_config)?;
        Ok(match &config.github_token {
            Some(token) => client.with_auth(AuthContext::bearer(token.clone())),
            None => client,
        })
    }

    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Public repositories of `user`, most recently updated first.
    pub async fn list_user_repos(&self, user: &str) -> Result<Vec<RepositoryRecord>, ApiError> {
        self.http
            .get_json::<Vec<RepositoryRecord>>(
                &["users", user, "repos"],
                &[("sort", "updated")],
                self.auth.as_ref(),
            )
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn lists_repositories_sorted_by_update() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("sort", "updated");
            then.status(200).json_body(json!([
                {
                    "id": 1,
                    "name": "hello-world",
                    "description": "My first repository",
                    "html_url": "https://github.com/octocat/hello-world",
                    "fork": false
                },
                {
                    "id": 2,
                    "name": "spoon-knife",
                    "description": null,
                    "html_url": "https://github.com/octocat/spoon-knife"
                },
                {
                    "id": 3,
                    "name": "linguist",
                    "html_url": "https://github.com/octocat/linguist"
                }
            ]));
        });

        let config = ApiClientConfig::try_from_url(&server.url("/")).unwrap();
        let client = GithubClient::new(config).unwrap();
        let repos = client.list_user_repos("octocat").await.unwrap();

        mock.assert();
        let names: Vec<_> = repos.iter().map(|repo| repo.name.as_str()).collect();
        assert_eq!(names, vec!["hello-world", "spoon-knife", "linguist"]);
        assert_eq!(repos[0].description.as_deref(), Some("My first repository"));
        assert_eq!(repos[1].description, None);
        assert_eq!(repos[2].description, None);
    }

    #[tokio::test]
    async fn configured_token_is_sent_as_bearer() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .header("authorization", "Bearer ghp_example");
            then.status(200).json_body(json!([]));
        });

        let config = AppConfig {
            github_api_base_url: server.url("/"),
            github_token: Some("ghp_example".into()),
            ..AppConfig::default()
        };
        let client = GithubClient::from_config(&config).unwrap();
        let repos = client.list_user_repos("octocat").await.unwrap();

        mock.assert();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn user_name_stays_one_path_segment() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users/a%2Fb%3Fc/repos")
                .query_param("sort", "updated");
            then.status(200).json_body(json!([]));
        });

        let config = ApiClientConfig::try_from_url(&server.url("/")).unwrap();
        let client = GithubClient::new(config).unwrap();
        let repos = client.list_user_repos("a/b?c").await.unwrap();

        mock.assert();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn rejects_body_that_is_not_an_array() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/users/octocat/repos");
            then.status(200).json_body(json!({ "message": "unexpected" }));
        });

        let config = ApiClientConfig::try_from_url(&server.url("/")).unwrap();
        let client = GithubClient::new(config).unwrap();
        let err = client.list_user_repos("octocat").await.unwrap_err();
        assert!(matches!(err, ApiError::Deserialize { .. }));
    }
}
