//! Platform abstraction for reading comment/inbox feeds and posting replies.
//!
//! [`PlatformClient`] is transport-agnostic; fixbot-reddit implements it over the Reddit HTTP API
//! and tests substitute an in-memory client.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::PlatformError;
use crate::types::{CommentItem, MentionItem};

/// Live, unbounded feed of items. Each element is either an item or the error that interrupted
/// a poll; the stream keeps going after an error.
pub type ItemStream<T> = BoxStream<'static, Result<T, PlatformError>>;

/// Capability the stream processors need from the platform. Must tolerate concurrent use by
/// the comment and mention processors.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Username of the authenticated bot account.
    fn username(&self) -> &str;

    /// Live comment feed for a community scope (e.g. `all`). With `skip_existing`, items that
    /// are already present when the stream starts are not yielded.
    fn comment_stream(&self, scope: &str, skip_existing: bool) -> ItemStream<CommentItem>;

    /// Live feed of unread inbox items (mentions, comment replies, private messages).
    fn inbox_stream(&self) -> ItemStream<MentionItem>;

    /// Re-fetches a comment or submission by fullname, including its direct replies.
    async fn refresh(&self, id: &str) -> Result<CommentItem, PlatformError>;

    /// Posts `text` as a reply to `item`.
    async fn reply(&self, item: &CommentItem, text: &str) -> Result<(), PlatformError>;

    /// Marks inbox items as read.
    async fn mark_read(&self, items: &[MentionItem]) -> Result<(), PlatformError>;
}
