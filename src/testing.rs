//! In-memory `UserApi` for exercising searches without a network.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{UserApi, UserQuery};
use crate::error::SearchError;
use crate::models::{GitHubUser, SearchResponse, SearchUser};

/// Builds a profile with predictable field values for `login`.
pub fn sample_user(login: &str) -> GitHubUser {
    GitHubUser {
        login: login.to_string(),
        id: login.bytes().map(u64::from).sum(),
        avatar_url: format!("https://avatars.example.com/{login}"),
        html_url: format!("https://github.com/{login}"),
        name: Some(format!("{login} name")),
        bio: None,
        location: Some("Earth".to_string()),
        company: None,
        blog: None,
        twitter_username: None,
        public_repos: 12,
        followers: 1500,
        following: 3,
        created_at: "2015-06-01T00:00:00Z".to_string(),
    }
}

/// Mock API with a fixed search outcome and per-login detail outcomes.
///
/// Logins added with [`MockUserApi::with_user`] appear in the search page and
/// resolve to [`sample_user`]; logins added with [`MockUserApi::with_failing_user`]
/// appear in the search page but their detail fetch returns the given error;
/// logins added with [`MockUserApi::with_panicking_user`] panic inside the fetch.
pub struct MockUserApi {
    total_count: u64,
    summaries: Vec<SearchUser>,
    search_error: Option<SearchError>,
    details: HashMap<String, Result<GitHubUser, SearchError>>,
    panicking: HashSet<String>,
    queries: Mutex<Vec<UserQuery>>,
    fetched: Mutex<Vec<String>>,
}

impl Default for MockUserApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUserApi {
    pub fn new() -> Self {
        Self {
            total_count: 0,
            summaries: Vec::new(),
            search_error: None,
            details: HashMap::new(),
            panicking: HashSet::new(),
            queries: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Overrides the reported total; defaults to the number of summaries.
    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = total_count;
        self
    }

    pub fn with_user(mut self, login: &str) -> Self {
        self.push_summary(login);
        self.details.insert(login.to_string(), Ok(sample_user(login)));
        self
    }

    pub fn with_failing_user(mut self, login: &str, error: SearchError) -> Self {
        self.push_summary(login);
        self.details.insert(login.to_string(), Err(error));
        self
    }

    pub fn with_panicking_user(mut self, login: &str) -> Self {
        self.push_summary(login);
        self.panicking.insert(login.to_string());
        self
    }

    pub fn with_search_error(mut self, error: SearchError) -> Self {
        self.search_error = Some(error);
        self
    }

    /// Queries received by `search_users`, in call order.
    pub fn queries(&self) -> Vec<UserQuery> {
        self.queries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Distinct logins received by `fetch_user`.
    pub fn fetched(&self) -> HashSet<String> {
        self.fetched
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn push_summary(&mut self, login: &str) {
        let user = sample_user(login);
        self.summaries.push(SearchUser {
            login: user.login,
            id: user.id,
            avatar_url: user.avatar_url,
        });
        self.total_count = self.total_count.max(self.summaries.len() as u64);
    }
}

#[async_trait]
impl UserApi for MockUserApi {
    async fn search_users(&self, query: &UserQuery) -> Result<SearchResponse, SearchError> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());

        if let Some(error) = &self.search_error {
            return Err(error.clone());
        }

        Ok(SearchResponse {
            total_count: self.total_count,
            incomplete_results: false,
            items: self.summaries.clone(),
        })
    }

    async fn fetch_user(&self, username: &str) -> Result<GitHubUser, SearchError> {
        self.fetched
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(username.to_string());

        if self.panicking.contains(username) {
            panic!("detail fetch for {username} panicked");
        }

        self.details
            .get(username)
            .cloned()
            .unwrap_or_else(|| Err(SearchError::NotFound(username.to_string())))
    }
}
