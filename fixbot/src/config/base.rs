//! Base config: Reddit session, logging, healthcheck port. Loaded from env.

use anyhow::{Context, Result};
use fixbot_reddit::RedditConfig;
use std::env;

/// Base config: transport, logging and process plumbing only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// REDDIT_* credentials and endpoints
    pub reddit: RedditConfig,
    /// LOG_FILE
    pub log_file: String,
    /// SERVER_PORT for the liveness endpoint
    pub server_port: u16,
    /// PLATFORM_DEBUG_LOG: raise the Reddit client's log level to debug
    pub platform_debug: bool,
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

impl BaseConfig {
    pub fn load() -> Result<Self> {
        let reddit = RedditConfig::from_env()?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/fixbot.log".to_string());
        let server_port = match env::var("SERVER_PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("SERVER_PORT is not a port number: {}", port))?,
            Err(_) => 8080,
        };
        let platform_debug = env::var("PLATFORM_DEBUG_LOG")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            reddit,
            log_file,
            server_port,
            platform_debug,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.reddit.validate()
    }
}
