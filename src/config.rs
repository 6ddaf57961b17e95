use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = "rust-github-user-client";

/// Runtime settings for the GitHub client.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads settings from the environment. A `.env` file is honoured when present.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        let token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        if token.is_none() {
            info!("GITHUB_TOKEN not set, using unauthenticated requests");
        }

        Self {
            api_url: try_load("GITHUB_API_URL", DEFAULT_API_URL.to_string()),
            token,
            timeout: Duration::from_secs(try_load("GITHUB_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_api_url(Some("http://localhost:9000".to_string()))
            .with_timeout(Some(3))
            .with_api_url(None);
        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_try_load_falls_back_on_missing_key() {
        let value: u64 = try_load("GITHUB_USER_SEARCH_TEST_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
