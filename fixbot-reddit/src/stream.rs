//! Polling streams over listing endpoints.
//!
//! Each poll fetches the newest page, drops ids already yielded (bounded memory of recent ids),
//! and yields the rest oldest first. Empty polls back off exponentially up to a ceiling; a poll
//! with new items resets the delay.

use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::time::Duration;

use fixbot_core::{ItemStream, PlatformError};
use futures::stream::{self, StreamExt};
use tracing::debug;

/// How many recent ids a stream remembers. A page holds at most 100 items, so 301 covers three.
pub const SEEN_CAPACITY: usize = 301;

/// Insertion-ordered set that forgets its oldest entry once full.
#[derive(Debug)]
pub struct SeenSet {
    capacity: usize,
    order: VecDeque<String>,
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            ids: HashSet::with_capacity(capacity),
        }
    }

    /// Records `id`; returns false if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
            }
        }
        self.order.push_back(id.to_string());
        self.ids.insert(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Idle back-off bounds for a polling stream.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(16),
        }
    }
}

struct PollState<T, F> {
    fetch: F,
    seen: SeenSet,
    pending: VecDeque<T>,
    skip_next_page: bool,
    settings: PollSettings,
    delay: Duration,
    idle: bool,
}

/// Turns a page fetcher into an endless stream. `fetch` returns `(id, item)` pairs newest first,
/// the order listing endpoints use. With `skip_existing`, the first page only seeds the seen set.
pub fn poll_stream<T, F, Fut>(fetch: F, skip_existing: bool, settings: PollSettings) -> ItemStream<T>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Vec<(String, T)>, PlatformError>> + Send + 'static,
{
    let state = PollState {
        fetch,
        seen: SeenSet::new(SEEN_CAPACITY),
        pending: VecDeque::new(),
        skip_next_page: skip_existing,
        settings,
        delay: settings.min_delay,
        idle: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((Ok(item), state));
            }

            if state.idle {
                tokio::time::sleep(state.delay).await;
                state.delay = (state.delay * 2).min(state.settings.max_delay);
            }

            let page = match (state.fetch)().await {
                Ok(page) => page,
                Err(e) => {
                    state.idle = true;
                    return Some((Err(e), state));
                }
            };

            let mut fresh: Vec<T> = Vec::new();
            for (id, item) in page.into_iter().rev() {
                if state.seen.insert(&id) {
                    fresh.push(item);
                }
            }

            if state.skip_next_page {
                debug!(skipped = fresh.len(), "step: stream skipped existing items");
                state.skip_next_page = false;
                fresh.clear();
            }

            if fresh.is_empty() {
                state.idle = true;
            } else {
                debug!(new_items = fresh.len(), "step: stream poll found items");
                state.idle = false;
                state.delay = state.settings.min_delay;
                state.pending.extend(fresh);
            }
        }
    })
    .boxed()
}
