//! Core types: comment, mention, and reply mode.

use serde::{Deserialize, Serialize};

/// Read-only view of a platform comment (or submission) as of its last fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentItem {
    /// Platform fullname, e.g. `t1_abc123` for comments or `t3_xyz` for submissions.
    pub id: String,
    /// Raw markup text as stored by the platform.
    pub body: String,
    /// Author username; `None` when the account was deleted.
    pub author: Option<String>,
    pub subreddit: String,
    pub permalink: String,
    /// Direct replies at the time of the last fetch. Not kept in sync with the platform.
    #[serde(default)]
    pub replies: Vec<CommentItem>,
}

impl CommentItem {
    /// Returns true if `name` authored this item. Case-insensitive, like platform usernames.
    pub fn is_authored_by(&self, name: &str) -> bool {
        self.author
            .as_deref()
            .map(|author| author.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }
}

/// Inbox notification (username mention or comment reply) consumed by the mention stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionItem {
    /// Fullname of the inbox item; used for mark-read.
    pub id: String,
    pub author: Option<String>,
    pub subreddit: Option<String>,
    /// Fullname of the comment or submission the mention replied to. `None` for private messages.
    pub parent_id: Option<String>,
    pub body: String,
}

/// Whether replies are actually posted or only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyMode {
    Live,
    DryRun,
}

impl ReplyMode {
    /// Parses `REPLY_MODE`. Only `reply` / `live` (any case) post; everything else is a dry run.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "reply" | "live" => ReplyMode::Live,
            _ => ReplyMode::DryRun,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyMode::Live => "live",
            ReplyMode::DryRun => "dry-run",
        }
    }
}
