//! Paginated user search with per-result detail fan-out.
//!
//! A search runs in two phases. The criteria become one `/search/users`
//! request; once that page of summaries arrives, every summary's full profile
//! is fetched in its own task. Profiles whose fetch fails are dropped from the
//! page, while `total_count` keeps the number GitHub reported.

use std::sync::Arc;

use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::client::{UserApi, UserQuery};
use crate::error::SearchError;
use crate::models::GitHubUser;
use crate::pagination;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZES: [u32; 4] = [8, 16, 24, 32];
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Query used when no criteria are present.
pub const ANY_USER: &str = "type:user";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortMode {
    /// GitHub's default ranking.
    #[default]
    #[value(name = "best-match")]
    Relevance,
    Followers,
    Repositories,
    Joined,
}

impl SortMode {
    /// The `sort` query parameter, absent for relevance ranking.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortMode::Relevance => None,
            SortMode::Followers => Some("followers"),
            SortMode::Repositories => Some("repositories"),
            SortMode::Joined => Some("joined"),
        }
    }
}

/// What to search for. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    identifier: String,
    location: String,
    min_count: u32,
    sort: SortMode,
    page: u32,
    page_size: u32,
}

impl SearchCriteria {
    pub fn new(
        identifier: impl Into<String>,
        location: impl Into<String>,
        min_count: u32,
        sort: SortMode,
        page: u32,
        page_size: u32,
    ) -> Result<Self, SearchError> {
        if page == 0 {
            return Err(SearchError::InvalidCriteria(
                "page must be at least 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(SearchError::InvalidCriteria(
                "page size must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            identifier: identifier.into(),
            location: location.into(),
            min_count,
            sort,
            page,
            page_size,
        })
    }

    /// Same criteria on another page.
    pub fn with_page(&self, page: u32) -> Result<Self, SearchError> {
        Self::new(
            self.identifier.clone(),
            self.location.clone(),
            self.min_count,
            self.sort,
            page,
            self.page_size,
        )
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Search qualifiers joined by spaces. Never empty.
    pub fn query_string(&self) -> String {
        let mut parts = Vec::new();

        let identifier = self.identifier.trim();
        if !identifier.is_empty() {
            parts.push(format!("{identifier} in:login"));
        }

        let location = self.location.trim();
        if !location.is_empty() {
            parts.push(format!("location:\"{location}\""));
        }

        if self.min_count > 0 {
            parts.push(format!("repos:>={}", self.min_count));
        }

        if parts.is_empty() {
            parts.push(ANY_USER.to_string());
        }

        parts.join(" ")
    }

    pub fn to_query(&self) -> UserQuery {
        UserQuery {
            q: self.query_string(),
            sort: self.sort.as_param(),
            page: self.page,
            per_page: self.page_size,
        }
    }
}

/// One page of aggregated search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    pub items: Vec<GitHubUser>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl ResultPage {
    pub fn new(items: Vec<GitHubUser>, total_count: u64, page: u32, page_size: u32) -> Self {
        Self {
            items,
            total_count,
            page,
            page_size,
            total_pages: pagination::total_pages(total_count, page_size),
        }
    }

    pub fn empty(page: u32, page_size: u32) -> Self {
        Self::new(Vec::new(), 0, page, page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ResultPage {
    fn default() -> Self {
        Self::empty(1, DEFAULT_PAGE_SIZE)
    }
}

/// Runs a paginated search and fetches every result's full profile.
///
/// # Errors
///
/// Returns the search request's error. Detail-fetch failures are not errors;
/// those profiles are left out of the page.
pub async fn search<A>(api: Arc<A>, criteria: &SearchCriteria) -> Result<ResultPage, SearchError>
where
    A: UserApi + ?Sized + 'static,
{
    let query = criteria.to_query();
    let response = api.search_users(&query).await?;

    if response.items.is_empty() {
        info!(q = %query.q, "Search returned no users");
        return Ok(ResultPage::empty(criteria.page(), criteria.page_size()));
    }

    if response.incomplete_results {
        debug!(q = %query.q, "GitHub reported incomplete results");
    }

    let page_size = criteria.page_size() as usize;
    if response.items.len() > page_size {
        warn!(
            received = response.items.len(),
            page_size, "Search returned more summaries than requested, ignoring the rest"
        );
    }

    let mut handles = Vec::with_capacity(page_size.min(response.items.len()));
    for summary in response.items.iter().take(page_size) {
        let api = Arc::clone(&api);
        let login = summary.login.clone();
        handles.push(tokio::spawn(async move {
            let result = api.fetch_user(&login).await;
            (login, result)
        }));
    }

    let requested = handles.len();
    let mut items = Vec::with_capacity(requested);
    for handle in handles {
        match handle.await {
            Ok((_, Ok(user))) => items.push(user),
            Ok((login, Err(e))) => warn!(%login, "Dropping user from results: {e}"),
            Err(e) => warn!("Detail fetch task failed: {e}"),
        }
    }

    info!(
        q = %query.q,
        total_count = response.total_count,
        fetched = items.len(),
        dropped = requested - items.len(),
        "Search complete"
    );

    Ok(ResultPage::new(
        items,
        response.total_count,
        criteria.page(),
        criteria.page_size(),
    ))
}
