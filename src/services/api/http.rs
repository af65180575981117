use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: Url,
    /// Overall request deadline. `None` lets a request run until it completes or fails.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ApiClientConfig {
    pub fn try_from_url(url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBase(url.to_string()));
        }
        Ok(Self::new(base_url))
    }

    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
            user_agent: format!("Folio/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: ApiClientConfig,
}

impl HttpClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Request)?;

        Ok(Self { client, config })
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBase(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn apply_auth(&self, builder: RequestBuilder, auth: Option<&AuthContext>) -> RequestBuilder {
        if let Some(auth_ctx) = auth {
            auth_ctx.apply(builder)
        } else {
            builder
        }
    }

    pub async fn get_json<T>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        auth: Option<&AuthContext>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(segments, query)?;
        tracing::debug!(%url, "GET");
        let builder = self
            .apply_auth(self.client.get(url), auth)
            .header(reqwest::header::ACCEPT, "application/json");
        let response = builder.send().await.map_err(ApiError::Request)?;
        Self::hydrate_response(response).await
    }

    async fn hydrate_response<T>(response: reqwest::Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Request)?;

        if !status.is_success() {
            return Err(ApiError::HttpStatus { status, body });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Deserialize { source, body })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub bearer_token: Option<String>,
}

impl AuthContext {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
        }
    }

    pub fn apply(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("URL cannot be used as an API base: {0}")]
    InvalidBase(String),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("failed to deserialize response: {source}")]
    Deserialize {
        source: serde_json::Error,
        body: String,
    },
}

impl ApiError {
    /// The reason phrase for non-success responses, e.g. "Not Found".
    pub fn status_text(&self) -> Option<&'static str> {
        match self {
            ApiError::HttpStatus { status, .. } => status.canonical_reason(),
            _ => None,
        }
    }
}
