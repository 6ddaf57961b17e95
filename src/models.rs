use serde::{Deserialize, Serialize};

/// A GitHub user profile from the `/users/{username}` API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: String,
}

impl GitHubUser {
    /// Display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// Response from the GitHub Search Users API (`/search/users`).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<SearchUser>,
}

/// A single user item from the search results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchUser {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
}

/// Quota for one API resource, from `/rate_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitResource {
    pub limit: u32,
    pub remaining: u32,
    #[serde(default)]
    pub used: u32,
    /// Epoch second at which the window resets.
    pub reset: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResources {
    pub core: RateLimitResource,
    pub search: RateLimitResource,
}

/// Response from `/rate_limit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub resources: RateLimitResources,
}
