//! Advanced GitHub user search and a small recipe collection.
//!
//! The search side turns filter criteria into a `/search/users` query, fetches
//! each result's full profile concurrently and hands back one page of profiles
//! with pagination metadata:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use github_user_search::{search, Config, GitHubClient, SearchCriteria, SortMode};
//!
//! # async fn run() -> Result<(), github_user_search::SearchError> {
//! let client = Arc::new(GitHubClient::new(&Config::load())?);
//! let criteria = SearchCriteria::new("octocat", "", 0, SortMode::Followers, 1, 8)?;
//! let page = search(client, &criteria).await?;
//! println!("{} of {} users", page.items.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod recipes;
pub mod render;
pub mod search;
pub mod testing;
pub mod view;

pub use client::{GitHubClient, UserApi, UserQuery};
pub use config::Config;
pub use error::SearchError;
pub use models::{GitHubUser, RateLimitStatus, SearchResponse, SearchUser};
pub use pagination::{page_window, PageLink, PageWindow};
pub use recipes::{filter, Recipe, RecipeStore};
pub use search::{search, ResultPage, SearchCriteria, SortMode};
pub use view::{FormError, Navigation, SearchForm, SearchView};
