//! Reddit session config loaded from `REDDIT_*` environment variables.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://oauth.reddit.com";
pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com";

/// Script-app credentials plus endpoints. Endpoints are overridable for tests and proxies.
#[derive(Debug, Clone)]
pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
    /// REDDIT_API_URL, default `https://oauth.reddit.com`
    pub api_url: String,
    /// REDDIT_AUTH_URL, default `https://www.reddit.com`
    pub auth_url: String,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} not set", name))
}

impl RedditConfig {
    /// Loads from env: REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET, REDDIT_USERNAME, REDDIT_PASSWORD and
    /// REDDIT_USER_AGENT are required; REDDIT_API_URL and REDDIT_AUTH_URL are optional.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required("REDDIT_CLIENT_ID")?,
            client_secret: required("REDDIT_CLIENT_SECRET")?,
            username: required("REDDIT_USERNAME")?,
            password: required("REDDIT_PASSWORD")?,
            user_agent: required("REDDIT_USER_AGENT")?,
            api_url: env::var("REDDIT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            auth_url: env::var("REDDIT_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
        })
    }

    /// Builds a config pointing both endpoints at `base_url` (mock servers).
    pub fn for_base_url(base_url: &str, username: &str) -> Self {
        Self {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            username: username.to_string(),
            password: "password".to_string(),
            user_agent: format!("fixbot-test by u/{}", username),
            api_url: base_url.to_string(),
            auth_url: base_url.to_string(),
        }
    }

    /// Checks that endpoints parse as URLs and credentials are non-empty.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("REDDIT_API_URL", &self.api_url), ("REDDIT_AUTH_URL", &self.auth_url)] {
            if reqwest::Url::parse(value).is_err() {
                anyhow::bail!("{} is set but not a valid URL: {}", name, value);
            }
        }
        if self.username.trim().is_empty() {
            anyhow::bail!("REDDIT_USERNAME is empty");
        }
        if self.user_agent.trim().is_empty() {
            anyhow::bail!("REDDIT_USER_AGENT is empty");
        }
        Ok(())
    }
}
