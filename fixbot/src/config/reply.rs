//! Reply policy: mode, settle/retry delays, the other bot to defer to, feed scope.

use anyhow::{Context, Result};
use fixbot_core::ReplyMode;
use std::env;
use std::time::Duration;

pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 120;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 60;
pub const DEFAULT_OTHER_BOT_ACCOUNT: &str = "underscorebot";
pub const DEFAULT_COMMENT_SCOPE: &str = "all";

#[derive(Debug, Clone)]
pub struct ReplyConfig {
    /// REPLY_MODE: `reply` / `live` posts, anything else only logs
    pub reply_mode: ReplyMode,
    /// SETTLE_DELAY_SECS: wait before inspecting a comment from the live feed
    pub settle_delay: Duration,
    /// RETRY_DELAY_SECS: wait before the single retry of a failed reply
    pub retry_delay: Duration,
    /// OTHER_BOT_ACCOUNT: a reply from this account also counts as answered; empty disables
    pub other_bot_account: Option<String>,
    /// COMMENT_SCOPE: community scope of the comment feed
    pub comment_scope: String,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            reply_mode: ReplyMode::DryRun,
            settle_delay: Duration::from_secs(DEFAULT_SETTLE_DELAY_SECS),
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            other_bot_account: Some(DEFAULT_OTHER_BOT_ACCOUNT.to_string()),
            comment_scope: DEFAULT_COMMENT_SCOPE.to_string(),
        }
    }
}

fn secs_from_env(name: &str, default: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Duration::from_secs)
            .with_context(|| format!("{} is not a number of seconds: {}", name, value)),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

impl ReplyConfig {
    pub fn from_env() -> Result<Self> {
        let reply_mode = env::var("REPLY_MODE")
            .map(|v| ReplyMode::parse(&v))
            .unwrap_or(ReplyMode::DryRun);
        let other_bot_account = match env::var("OTHER_BOT_ACCOUNT") {
            Ok(name) if name.trim().is_empty() => None,
            Ok(name) => Some(name.trim().to_string()),
            Err(_) => Some(DEFAULT_OTHER_BOT_ACCOUNT.to_string()),
        };

        Ok(Self {
            reply_mode,
            settle_delay: secs_from_env("SETTLE_DELAY_SECS", DEFAULT_SETTLE_DELAY_SECS)?,
            retry_delay: secs_from_env("RETRY_DELAY_SECS", DEFAULT_RETRY_DELAY_SECS)?,
            other_bot_account,
            comment_scope: env::var("COMMENT_SCOPE")
                .unwrap_or_else(|_| DEFAULT_COMMENT_SCOPE.to_string()),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.comment_scope.trim().is_empty() {
            anyhow::bail!("COMMENT_SCOPE is empty");
        }
        Ok(())
    }
}
