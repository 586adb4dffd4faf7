//! In-memory [`fixbot_core::PlatformClient`] for integration tests.
//!
//! Feeds are scripted up front and end when exhausted. Replies and mark-read calls are recorded
//! so tests can assert on what would have been posted.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fixbot_core::{
    CommentItem, ItemStream, MentionItem, PlatformClient, PlatformError, PlatformErrorKind,
};
use futures::stream::{self, StreamExt};

/// One recorded call to `reply(item, text)`.
#[derive(Debug, Clone)]
pub struct ReplyRecord {
    pub item_id: String,
    pub text: String,
}

#[derive(Default)]
struct State {
    comments: Vec<Result<CommentItem, PlatformError>>,
    mentions: Vec<Result<MentionItem, PlatformError>>,
    refreshed: HashMap<String, Result<CommentItem, PlatformError>>,
    reply_results: VecDeque<Result<(), PlatformError>>,
    mark_read_error: Option<PlatformError>,
    replies: Vec<ReplyRecord>,
    reply_attempts: usize,
    refresh_calls: Vec<String>,
    marked_read: Vec<String>,
}

/// Mock platform. Unknown ids refresh to `NotFound`; replies succeed unless scripted otherwise.
pub struct MockPlatform {
    username: String,
    state: Mutex<State>,
}

#[allow(dead_code)]
impl MockPlatform {
    pub fn new(username: &str) -> Arc<Self> {
        Arc::new(Self {
            username: username.to_string(),
            state: Mutex::new(State::default()),
        })
    }

    pub fn push_comment(&self, item: CommentItem) {
        self.state.lock().unwrap().comments.push(Ok(item));
    }

    pub fn push_comment_error(&self, err: PlatformError) {
        self.state.lock().unwrap().comments.push(Err(err));
    }

    pub fn push_mention(&self, item: MentionItem) {
        self.state.lock().unwrap().mentions.push(Ok(item));
    }

    pub fn push_mention_error(&self, err: PlatformError) {
        self.state.lock().unwrap().mentions.push(Err(err));
    }

    /// What `refresh(item.id)` returns from now on.
    pub fn set_refreshed(&self, item: CommentItem) {
        self.state
            .lock()
            .unwrap()
            .refreshed
            .insert(item.id.clone(), Ok(item));
    }

    pub fn fail_refresh(&self, id: &str, err: PlatformError) {
        self.state
            .lock()
            .unwrap()
            .refreshed
            .insert(id.to_string(), Err(err));
    }

    /// Queues the result of the next `reply` call.
    pub fn push_reply_result(&self, result: Result<(), PlatformError>) {
        self.state.lock().unwrap().reply_results.push_back(result);
    }

    pub fn fail_mark_read(&self, err: PlatformError) {
        self.state.lock().unwrap().mark_read_error = Some(err);
    }

    /// Successful replies only.
    pub fn replies(&self) -> Vec<ReplyRecord> {
        self.state.lock().unwrap().replies.clone()
    }

    pub fn reply_attempts(&self) -> usize {
        self.state.lock().unwrap().reply_attempts
    }

    pub fn refresh_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().refresh_calls.clone()
    }

    pub fn marked_read(&self) -> Vec<String> {
        self.state.lock().unwrap().marked_read.clone()
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    fn username(&self) -> &str {
        &self.username
    }

    fn comment_stream(&self, _scope: &str, _skip_existing: bool) -> ItemStream<CommentItem> {
        let items = std::mem::take(&mut self.state.lock().unwrap().comments);
        stream::iter(items).boxed()
    }

    fn inbox_stream(&self) -> ItemStream<MentionItem> {
        let items = std::mem::take(&mut self.state.lock().unwrap().mentions);
        stream::iter(items).boxed()
    }

    async fn refresh(&self, id: &str) -> Result<CommentItem, PlatformError> {
        let mut state = self.state.lock().unwrap();
        state.refresh_calls.push(id.to_string());
        state.refreshed.get(id).cloned().unwrap_or_else(|| {
            Err(PlatformError::new(
                PlatformErrorKind::NotFound,
                format!("no thing {}", id),
            ))
        })
    }

    async fn reply(&self, item: &CommentItem, text: &str) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        state.reply_attempts += 1;
        let result = state.reply_results.pop_front().unwrap_or(Ok(()));
        if result.is_ok() {
            state.replies.push(ReplyRecord {
                item_id: item.id.clone(),
                text: text.to_string(),
            });
        }
        result
    }

    async fn mark_read(&self, items: &[MentionItem]) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        state
            .marked_read
            .extend(items.iter().map(|m| m.id.clone()));
        match &state.mark_read_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
