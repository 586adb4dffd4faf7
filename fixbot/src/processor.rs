//! Stream processors: one pull-loop per feed, one item at a time.
//!
//! Comment feed: extract → settle delay → refresh → re-extract → dedup → dispatch.
//! Inbox feed: refresh parent → extract → dedup → dispatch → mark read (every branch).

use std::sync::Arc;
use std::time::Duration;

use fixbot_core::{CommentItem, MentionItem, PlatformClient, PlatformError};
use futures::StreamExt;
use link_repair::find_broken_urls;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::config::ReplyConfig;
use crate::dedup::should_reply;
use crate::dispatcher::{classify, DispatchError, DispatchOutcome, FailureClass, ReplyDispatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSource {
    Comments,
    Mentions,
}

impl StreamSource {
    fn as_str(&self) -> &'static str {
        match self {
            StreamSource::Comments => "comments",
            StreamSource::Mentions => "mentions",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("unclassified platform failure: {0}")]
    Platform(#[from] PlatformError),

    #[error("{0} stream ended")]
    StreamEnded(&'static str),
}

/// Where an item's processing stopped.
#[derive(Debug)]
pub enum ItemOutcome {
    NoBrokenUrls,
    AlreadyReplied,
    /// Refresh failed with a Retry- or Skip-classified error; the item is dropped.
    Abandoned(PlatformError),
    /// Inbox item without a parent thing (private message).
    NoParent,
    Dispatched(DispatchOutcome),
}

/// Refreshed item, or the classified failure that abandons it.
enum Refreshed {
    Fresh(CommentItem),
    Abandoned(PlatformError),
}

pub struct StreamProcessor {
    client: Arc<dyn PlatformClient>,
    dispatcher: ReplyDispatcher,
    settle_delay: Duration,
    other_bot: Option<String>,
    comment_scope: String,
}

impl StreamProcessor {
    pub fn new(client: Arc<dyn PlatformClient>, config: &ReplyConfig) -> Self {
        let dispatcher = ReplyDispatcher::new(client.clone(), config.reply_mode, config.retry_delay);
        Self {
            client,
            dispatcher,
            settle_delay: config.settle_delay,
            other_bot: config.other_bot_account.clone(),
            comment_scope: config.comment_scope.clone(),
        }
    }

    fn already_replied(&self, item: &CommentItem) -> bool {
        !should_reply(&item.replies, self.client.username(), self.other_bot.as_deref())
    }

    async fn refresh(&self, id: &str) -> Result<Refreshed, ProcessError> {
        match self.client.refresh(id).await {
            Ok(item) => Ok(Refreshed::Fresh(item)),
            Err(e) => match classify(e.kind) {
                FailureClass::Retry | FailureClass::Skip => {
                    warn!(item_id = %id, error = %e, "Refresh failed, abandoning item");
                    Ok(Refreshed::Abandoned(e))
                }
                FailureClass::Propagate => Err(e.into()),
            },
        }
    }

    /// Dedup then dispatch for an already refreshed item.
    async fn answer(&self, item: &CommentItem, broken_urls: &[String]) -> Result<ItemOutcome, ProcessError> {
        if self.already_replied(item) {
            info!(item_id = %item.id, "step: already answered, skipping");
            return Ok(ItemOutcome::AlreadyReplied);
        }
        let outcome = self.dispatcher.dispatch(item, broken_urls).await?;
        Ok(ItemOutcome::Dispatched(outcome))
    }

    /// One comment from the live feed. Blocks for the settle delay when it has broken URLs.
    #[instrument(skip(self, comment), fields(item_id = %comment.id))]
    pub async fn process_comment(&self, comment: CommentItem) -> Result<ItemOutcome, ProcessError> {
        if find_broken_urls(&comment.body).is_empty() {
            return Ok(ItemOutcome::NoBrokenUrls);
        }

        info!(
            subreddit = %comment.subreddit,
            settle_secs = self.settle_delay.as_secs_f64(),
            "step: broken urls found, waiting for edits to settle"
        );
        tokio::time::sleep(self.settle_delay).await;

        let fresh = match self.refresh(&comment.id).await? {
            Refreshed::Fresh(item) => item,
            Refreshed::Abandoned(e) => return Ok(ItemOutcome::Abandoned(e)),
        };

        // The author may have fixed the links during the settle window.
        let broken_urls = find_broken_urls(&fresh.body);
        if broken_urls.is_empty() {
            info!("step: links fixed by author, skipping");
            return Ok(ItemOutcome::NoBrokenUrls);
        }

        self.answer(&fresh, &broken_urls).await
    }

    async fn handle_mention(&self, mention: &MentionItem) -> Result<ItemOutcome, ProcessError> {
        let Some(parent_id) = mention.parent_id.as_deref() else {
            debug!("step: inbox item has no parent");
            return Ok(ItemOutcome::NoParent);
        };

        let parent = match self.refresh(parent_id).await? {
            Refreshed::Fresh(item) => item,
            Refreshed::Abandoned(e) => return Ok(ItemOutcome::Abandoned(e)),
        };

        let broken_urls = find_broken_urls(&parent.body);
        if broken_urls.is_empty() {
            return Ok(ItemOutcome::NoBrokenUrls);
        }

        self.answer(&parent, &broken_urls).await
    }

    /// One inbox item. It is marked read afterwards whatever the outcome, including failure.
    #[instrument(skip(self, mention), fields(mention_id = %mention.id))]
    pub async fn process_mention(&self, mention: &MentionItem) -> Result<ItemOutcome, ProcessError> {
        let outcome = self.handle_mention(mention).await;

        if let Err(e) = self.client.mark_read(std::slice::from_ref(mention)).await {
            match classify(e.kind) {
                FailureClass::Retry | FailureClass::Skip => {
                    warn!(error = %e, "Mark read failed");
                }
                FailureClass::Propagate if outcome.is_ok() => return Err(e.into()),
                FailureClass::Propagate => {
                    error!(error = %e, "Mark read failed after processing error");
                }
            }
        }

        outcome
    }

    /// Routes a stream poll error: Retry/Skip are logged and the loop pulls again.
    fn on_stream_error(&self, source: StreamSource, e: PlatformError) -> Result<(), ProcessError> {
        match classify(e.kind) {
            FailureClass::Retry | FailureClass::Skip => {
                warn!(stream = source.as_str(), error = %e, "Stream poll failed");
                Ok(())
            }
            FailureClass::Propagate => Err(e.into()),
        }
    }

    /// Pulls the feed until it ends or an unclassified error occurs. The live feeds never end,
    /// so this only returns with an error.
    #[instrument(skip(self))]
    pub async fn run(&self, source: StreamSource) -> Result<(), ProcessError> {
        info!(stream = source.as_str(), "step: stream processor started");
        match source {
            StreamSource::Comments => {
                let mut stream = self.client.comment_stream(&self.comment_scope, true);
                while let Some(next) = stream.next().await {
                    match next {
                        Ok(comment) => {
                            let outcome = self.process_comment(comment).await?;
                            debug!(outcome = ?outcome, "step: comment done");
                        }
                        Err(e) => self.on_stream_error(source, e)?,
                    }
                }
            }
            StreamSource::Mentions => {
                let mut stream = self.client.inbox_stream();
                while let Some(next) = stream.next().await {
                    match next {
                        Ok(mention) => {
                            let outcome = self.process_mention(&mention).await?;
                            debug!(outcome = ?outcome, "step: mention done");
                        }
                        Err(e) => self.on_stream_error(source, e)?,
                    }
                }
            }
        }
        Err(ProcessError::StreamEnded(source.as_str()))
    }
}
