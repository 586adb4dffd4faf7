//! Posts the corrective reply and decides what a failed post means.
//!
//! Platform failures go through [`classify`]: `Retry` schedules one detached, delayed second
//! attempt whose own failure is dropped; `Skip` gives up with a log line; `Propagate` returns an
//! error to the caller.

use std::sync::Arc;
use std::time::Duration;

use fixbot_core::{CommentItem, PlatformClient, PlatformError, PlatformErrorKind, ReplyMode};
use link_repair::{compose_reply, fix_broken_urls};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// What to do about a failed platform call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Retry,
    Skip,
    Propagate,
}

/// Classification table. Exhaustive over [`PlatformErrorKind`]; a new kind will not compile
/// until it is placed here.
pub fn classify(kind: PlatformErrorKind) -> FailureClass {
    match kind {
        PlatformErrorKind::Client | PlatformErrorKind::Api | PlatformErrorKind::RateLimited => {
            FailureClass::Retry
        }
        PlatformErrorKind::Forbidden
        | PlatformErrorKind::ServerError
        | PlatformErrorKind::NotFound => FailureClass::Skip,
        PlatformErrorKind::Unauthorized
        | PlatformErrorKind::Transport
        | PlatformErrorKind::Decode => FailureClass::Propagate,
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unclassified reply failure: {0}")]
    Unclassified(#[source] PlatformError),
}

/// Result of the delayed second attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome {
    Posted,
    Abandoned,
}

#[derive(Debug)]
pub enum DispatchOutcome {
    /// First attempt succeeded.
    Posted,
    /// Dry-run mode; the intended reply was logged only.
    DryRun,
    /// Skip-classified failure; nothing more will happen.
    Skipped(PlatformError),
    /// Retry-classified failure; the detached retry task is running.
    RetryScheduled(JoinHandle<RetryOutcome>),
}

pub struct ReplyDispatcher {
    client: Arc<dyn PlatformClient>,
    mode: ReplyMode,
    retry_delay: Duration,
}

impl ReplyDispatcher {
    pub fn new(client: Arc<dyn PlatformClient>, mode: ReplyMode, retry_delay: Duration) -> Self {
        Self {
            client,
            mode,
            retry_delay,
        }
    }

    /// Repairs `broken_urls`, composes the reply and posts it to `item` (at most once here, plus
    /// at most one scheduled retry).
    #[instrument(skip(self, item, broken_urls), fields(item_id = %item.id))]
    pub async fn dispatch(
        &self,
        item: &CommentItem,
        broken_urls: &[String],
    ) -> Result<DispatchOutcome, DispatchError> {
        if self.mode == ReplyMode::DryRun {
            info!(
                subreddit = %item.subreddit,
                permalink = %item.permalink,
                broken_urls = ?broken_urls,
                "step: dry run, reply not posted"
            );
            return Ok(DispatchOutcome::DryRun);
        }

        let fixed_urls = fix_broken_urls(broken_urls);
        let message = compose_reply(&fixed_urls);
        info!(
            subreddit = %item.subreddit,
            permalink = %item.permalink,
            broken_urls = ?broken_urls,
            "step: posting reply"
        );

        let err = match self.client.reply(item, &message).await {
            Ok(()) => {
                info!("step: reply posted");
                return Ok(DispatchOutcome::Posted);
            }
            Err(e) => e,
        };

        match classify(err.kind) {
            FailureClass::Retry => {
                warn!(error = %err, delay_secs = self.retry_delay.as_secs_f64(), "Reply failed, scheduling retry");
                let handle = tokio::spawn(retry_reply(
                    self.client.clone(),
                    item.clone(),
                    message,
                    self.retry_delay,
                ));
                Ok(DispatchOutcome::RetryScheduled(handle))
            }
            FailureClass::Skip => {
                warn!(error = %err, "Reply failed, skipping comment");
                Ok(DispatchOutcome::Skipped(err))
            }
            FailureClass::Propagate => {
                error!(error = %err, "Reply failed with unclassified error");
                Err(DispatchError::Unclassified(err))
            }
        }
    }
}

/// The one delayed retry. Any failure ends it; nothing is reported upward.
async fn retry_reply(
    client: Arc<dyn PlatformClient>,
    item: CommentItem,
    message: String,
    delay: Duration,
) -> RetryOutcome {
    tokio::time::sleep(delay).await;
    match client.reply(&item, &message).await {
        Ok(()) => {
            info!(item_id = %item.id, "step: retried reply posted");
            RetryOutcome::Posted
        }
        Err(e) => {
            info!(item_id = %item.id, error = %e, "Retried reply failed, giving up");
            RetryOutcome::Abandoned
        }
    }
}
