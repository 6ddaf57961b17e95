//! State behind the search screen: the criteria form and the displayed results.

use thiserror::Error;
use tracing::debug;

use crate::error::SearchError;
use crate::pagination::{page_window, PageLink};
use crate::search::{ResultPage, SearchCriteria, SortMode};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter at least one search criteria")]
    MissingCriteria,

    #[error("Minimum repositories must be a whole number, got {0:?}")]
    InvalidMinRepos(String),

    #[error(transparent)]
    Criteria(#[from] SearchError),
}

/// Raw input of the advanced search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub username: String,
    pub location: String,
    pub min_repos: String,
    pub sort: SortMode,
}

impl SearchForm {
    pub fn is_blank(&self) -> bool {
        self.username.trim().is_empty()
            && self.location.trim().is_empty()
            && self.min_repos.trim().is_empty()
    }

    /// Parsed minimum repository count; blank means no minimum.
    pub fn min_repos(&self) -> Result<u32, FormError> {
        let raw = self.min_repos.trim();
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse()
            .map_err(|_| FormError::InvalidMinRepos(raw.to_string()))
    }

    /// Validates the form and builds criteria for `page`.
    pub fn to_criteria(&self, page: u32, page_size: u32) -> Result<SearchCriteria, FormError> {
        if self.is_blank() {
            return Err(FormError::MissingCriteria);
        }
        self.to_criteria_unchecked(page, page_size)
    }

    /// Builds criteria without requiring any field, searching every user when blank.
    pub fn to_criteria_unchecked(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<SearchCriteria, FormError> {
        Ok(SearchCriteria::new(
            self.username.trim(),
            self.location.trim(),
            self.min_repos()?,
            self.sort,
            page,
            page_size,
        )?)
    }

    /// Describes what the current results are for.
    pub fn summary(&self) -> String {
        if self.is_blank() {
            return "All GitHub users".to_string();
        }

        let mut out = String::new();
        let username = self.username.trim();
        if !username.is_empty() {
            out.push_str(&format!("Results for \"{username}\""));
        }
        let location = self.location.trim();
        if !location.is_empty() {
            out.push_str(&format!(" in {location}"));
        }
        let min_repos = self.min_repos.trim();
        if !min_repos.is_empty() {
            out.push_str(&format!(" with {min_repos}+ repositories"));
        }
        out.trim_start().to_string()
    }
}

/// What a line of pager input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Quit,
    Page(u32),
    /// Unparseable input or a page outside the results.
    Ignored,
}

/// What the results surface currently shows.
///
/// There is no cancellation: whichever outcome is applied last is displayed.
#[derive(Debug, Clone, Default)]
pub struct SearchView {
    results: ResultPage,
    error: Option<String>,
    loading: bool,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &ResultPage {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replaces the displayed state with `outcome`. Failures reset to an empty page.
    pub fn apply(&mut self, outcome: Result<ResultPage, SearchError>) {
        self.loading = false;
        match outcome {
            Ok(page) => {
                debug!(page = page.page, items = page.items.len(), "Showing results");
                self.results = page;
                self.error = None;
            }
            Err(e) => {
                self.results = ResultPage::empty(1, self.results.page_size.max(1));
                self.error = Some(e.to_string());
            }
        }
    }

    /// `Some(page)` when `page` can be navigated to from the current results.
    pub fn target_page(&self, page: i64) -> Option<u32> {
        if page < 1 || page as u64 > self.results.total_pages {
            return None;
        }
        u32::try_from(page).ok()
    }

    /// Interprets pager input: `n`, `p`, a page number, or `q`/blank to stop.
    pub fn navigate(&self, input: &str) -> Navigation {
        let current = i64::from(self.results.page);
        let requested = match input.trim() {
            "" | "q" | "quit" => return Navigation::Quit,
            "n" | "next" => current + 1,
            "p" | "prev" => current - 1,
            other => match other.parse::<i64>() {
                Ok(page) => page,
                Err(_) => return Navigation::Ignored,
            },
        };
        self.target_page(requested)
            .map_or(Navigation::Ignored, Navigation::Page)
    }

    pub fn pages(&self) -> Vec<PageLink> {
        page_window(
            self.results.page as usize,
            usize::try_from(self.results.total_pages).unwrap_or(usize::MAX),
        )
    }

    pub fn headline(&self) -> String {
        format!("{} users found", with_separators(self.results.total_count))
    }

    /// True when a search finished with nothing to show and no error.
    pub fn is_no_results(&self) -> bool {
        !self.loading
            && self.error.is_none()
            && self.results.total_count == 0
            && self.results.items.is_empty()
    }
}

/// Formats `n` with comma thousands separators.
pub fn with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_user;

    fn form(username: &str, location: &str, min_repos: &str) -> SearchForm {
        SearchForm {
            username: username.to_string(),
            location: location.to_string(),
            min_repos: min_repos.to_string(),
            sort: SortMode::Relevance,
        }
    }

    #[test]
    fn test_blank_form_is_rejected() {
        let err = form(" ", "", "").to_criteria(1, 8).unwrap_err();
        assert_eq!(err, FormError::MissingCriteria);
        assert_eq!(err.to_string(), "Please enter at least one search criteria");
    }

    #[test]
    fn test_blank_form_unchecked_searches_everyone() {
        let criteria = form("", "", "").to_criteria_unchecked(1, 8).expect("valid");
        assert_eq!(criteria.query_string(), "type:user");
    }

    #[test]
    fn test_min_repos_must_be_a_number() {
        assert_eq!(
            form("", "", "lots").to_criteria(1, 8).unwrap_err(),
            FormError::InvalidMinRepos("lots".to_string())
        );
        assert!(form("", "", "-3").to_criteria(1, 8).is_err());
        let criteria = form("", "", " 7 ").to_criteria(1, 8).expect("valid");
        assert_eq!(criteria.min_count(), 7);
    }

    #[test]
    fn test_zero_page_size_surfaces_criteria_error() {
        assert!(matches!(
            form("a", "", "").to_criteria(1, 0),
            Err(FormError::Criteria(SearchError::InvalidCriteria(_)))
        ));
    }

    #[test]
    fn test_summary() {
        assert_eq!(form("", "", "").summary(), "All GitHub users");
        assert_eq!(form("octocat", "", "").summary(), "Results for \"octocat\"");
        assert_eq!(
            form("octocat", "Paris", "5").summary(),
            "Results for \"octocat\" in Paris with 5+ repositories"
        );
        assert_eq!(form("", "Paris", "").summary(), "in Paris");
    }

    #[test]
    fn test_last_applied_outcome_wins() {
        let mut view = SearchView::new();
        view.begin();
        view.begin();
        assert!(view.is_loading());

        view.apply(Ok(ResultPage::new(vec![sample_user("second")], 1, 1, 8)));
        view.apply(Ok(ResultPage::new(vec![sample_user("first")], 40, 2, 8)));

        assert!(!view.is_loading());
        assert_eq!(view.results().items[0].login, "first");
        assert_eq!(view.results().page, 2);
    }

    #[test]
    fn test_failure_resets_results() {
        let mut view = SearchView::new();
        view.apply(Ok(ResultPage::new(vec![sample_user("a")], 20, 2, 16)));
        view.apply(Err(SearchError::RateLimited { reset_at: None }));

        assert!(view.results().is_empty());
        assert_eq!(view.results().total_count, 0);
        assert_eq!(view.results().page, 1);
        assert_eq!(view.results().page_size, 16);
        assert_eq!(
            view.error(),
            Some("API rate limit exceeded. Please try again later.")
        );
        assert!(!view.is_no_results());
    }

    #[test]
    fn test_target_page_bounds() {
        let mut view = SearchView::new();
        assert_eq!(view.target_page(1), None);

        view.apply(Ok(ResultPage::new(vec![sample_user("a")], 30, 1, 8)));
        assert_eq!(view.target_page(0), None);
        assert_eq!(view.target_page(1), Some(1));
        assert_eq!(view.target_page(4), Some(4));
        assert_eq!(view.target_page(5), None);
    }

    #[test]
    fn test_navigate() {
        let mut view = SearchView::new();
        view.apply(Ok(ResultPage::new(vec![sample_user("a")], 24, 2, 8)));

        assert_eq!(view.navigate("n"), Navigation::Page(3));
        assert_eq!(view.navigate(" p "), Navigation::Page(1));
        assert_eq!(view.navigate("3"), Navigation::Page(3));
        assert_eq!(view.navigate("4"), Navigation::Ignored);
        assert_eq!(view.navigate("abc"), Navigation::Ignored);
        assert_eq!(view.navigate(""), Navigation::Quit);
        assert_eq!(view.navigate("q"), Navigation::Quit);

        view.apply(Ok(ResultPage::new(vec![sample_user("a")], 24, 3, 8)));
        assert_eq!(view.navigate("n"), Navigation::Ignored);
    }

    #[test]
    fn test_headline_and_pages() {
        let mut view = SearchView::new();
        assert!(view.is_no_results());
        assert!(view.pages().is_empty());

        view.apply(Ok(ResultPage::new(vec![sample_user("a")], 1234567, 1, 8)));
        assert_eq!(view.headline(), "1,234,567 users found");
        assert_eq!(view.pages().len(), 4);
    }

    #[test]
    fn test_with_separators() {
        assert_eq!(with_separators(0), "0");
        assert_eq!(with_separators(999), "999");
        assert_eq!(with_separators(1000), "1,000");
        assert_eq!(with_separators(12345), "12,345");
    }
}
