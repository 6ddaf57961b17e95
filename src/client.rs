use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{self, Config};
use crate::error::{classify_status, SearchError};
use crate::models::{GitHubUser, RateLimitStatus, SearchResponse};

/// One request against `/search/users`, already assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub q: String,
    pub sort: Option<&'static str>,
    pub page: u32,
    pub per_page: u32,
}

impl UserQuery {
    /// Query-string pairs in the order GitHub documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.q.clone()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ];
        if let Some(sort) = self.sort {
            params.push(("sort", sort.to_string()));
        }
        params
    }
}

/// The two remote operations a paginated search depends on.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Runs one page of a user search and returns the summaries.
    async fn search_users(&self, query: &UserQuery) -> Result<SearchResponse, SearchError>;

    /// Fetches the full profile for a login.
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser, SearchError>;
}

/// GitHub REST client sharing one connection pool across calls.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

/// Creates a preconfigured HTTP client with required headers.
fn build_client(config: &Config) -> Result<Client, SearchError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(config::USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

    if let Some(token) = config.token.as_deref() {
        let val = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| SearchError::InvalidCriteria(format!("Invalid token value: {e}")))?;
        headers.insert(AUTHORIZATION, val);
    }

    Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|e| SearchError::Unreachable(format!("Failed to build HTTP client: {e}")))
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        Ok(Self {
            http: build_client(config)?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the caller's current quota. Any failure is logged and yields `None`.
    pub async fn rate_limit(&self) -> Option<RateLimitStatus> {
        let url = format!("{}/rate_limit", self.base_url);

        let result: Result<RateLimitStatus, SearchError> = async {
            let response = self.http.get(&url).send().await?;
            decode::<RateLimitStatus>(response, "").await
        }
        .await;

        match result {
            Ok(status) => Some(status),
            Err(e) => {
                warn!("Rate limit lookup failed: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl UserApi for GitHubClient {
    async fn search_users(&self, query: &UserQuery) -> Result<SearchResponse, SearchError> {
        let url = format!("{}/search/users", self.base_url);
        debug!(q = %query.q, sort = ?query.sort, page = query.page, per_page = query.per_page, "Search params");

        let response = self.http.get(&url).query(&query.params()).send().await?;

        decode(response, &query.q).await
    }

    async fn fetch_user(&self, username: &str) -> Result<GitHubUser, SearchError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SearchError::InvalidCriteria(
                "Username must be a non-empty string".to_string(),
            ));
        }

        let url = format!("{}/users/{username}", self.base_url);
        debug!(%username, "Fetching user");

        let response = self.http.get(&url).send().await?;

        decode(response, username).await
    }
}

/// Turns a response into `T`, or into the matching error for non-success statuses.
async fn decode<T: DeserializeOwned>(response: Response, subject: &str) -> Result<T, SearchError> {
    let status = response.status();

    if !status.is_success() {
        let reset_at = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();
        return Err(classify_status(status, reset_at, body, subject));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| SearchError::Decode(e.to_string()))
}
