//! Error types shared by the search client and the views built on it.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a call against the GitHub API.
///
/// Every variant is terminal for the call that produced it; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The remote rejected the query (422) or the criteria were malformed locally.
    #[error("Invalid search parameters. Please adjust your criteria. ({0})")]
    InvalidCriteria(String),

    /// 403 or 429 from the remote. `reset_at` is the epoch second the quota refills.
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited { reset_at: Option<u64> },

    #[error("Looks like we cant find the user \"{0}\"")]
    NotFound(String),

    /// The request never produced a response.
    #[error("Failed to search users: {0}")]
    Unreachable(String),

    #[error("GitHub API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to deserialize GitHub response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Unreachable(err.to_string())
        }
    }
}

/// Maps a non-success HTTP status to the error taxonomy.
///
/// `subject` names what was requested (the login for detail fetches) and is
/// only used for not-found errors.
pub fn classify_status(
    status: StatusCode,
    reset_at: Option<u64>,
    body: String,
    subject: &str,
) -> SearchError {
    match status {
        StatusCode::UNPROCESSABLE_ENTITY => SearchError::InvalidCriteria(body),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            SearchError::RateLimited { reset_at }
        }
        StatusCode::NOT_FOUND => SearchError::NotFound(subject.to_string()),
        s => SearchError::Api {
            status: s.as_u16(),
            body,
        },
    }
}
