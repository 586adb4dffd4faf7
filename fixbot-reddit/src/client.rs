//! Reddit OAuth client implementing [`PlatformClient`].
//!
//! One `reqwest::Client` and one cached bearer token are shared by every clone, so the comment
//! and mention processors can use the same session concurrently.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use fixbot_core::{
    CommentItem, ItemStream, MentionItem, PlatformClient, PlatformError, PlatformErrorKind,
};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{comments_from_children, first_thing, mention_from_thing, short_id, Listing};
use crate::config::RedditConfig;
use crate::stream::{poll_stream, PollSettings};

/// Listing page size; Reddit's maximum.
const PAGE_LIMIT: &str = "100";
/// Reply page size on refresh; replies past it come back as `more` stubs and are dropped.
const REFRESH_LIMIT: &str = "500";
/// Tokens are renewed this long before Reddit says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

struct Inner {
    http: reqwest::Client,
    config: RedditConfig,
    poll: PollSettings,
    token: RwLock<Option<AccessToken>>,
}

/// Cheaply clonable Reddit session.
#[derive(Clone)]
pub struct RedditClient {
    inner: Arc<Inner>,
}

impl RedditClient {
    /// Creates a client with default polling back-off. No request is made until first use.
    pub fn new(config: RedditConfig) -> anyhow::Result<Self> {
        Self::with_poll_settings(config, PollSettings::default())
    }

    pub fn with_poll_settings(config: RedditConfig, poll: PollSettings) -> anyhow::Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config,
                poll,
                token: RwLock::new(None),
            }),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.config.api_url.trim_end_matches('/'), path)
    }

    /// Returns a valid bearer token, exchanging credentials when none is cached or it expired.
    async fn access_token(&self) -> Result<String, PlatformError> {
        if let Some(token) = self.inner.token.read().await.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let mut slot = self.inner.token.write().await;
        if let Some(token) = slot.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }
        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    #[instrument(skip(self))]
    async fn fetch_token(&self) -> Result<AccessToken, PlatformError> {
        let config = &self.inner.config;
        let url = format!("{}/api/v1/access_token", config.auth_url.trim_end_matches('/'));
        let response = self
            .inner
            .http
            .post(&url)
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", config.username.as_str()),
                ("password", config.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PlatformError::transport(e.to_string()))?;

        if let Some(err) = PlatformError::from_status(response.status().as_u16(), "token exchange") {
            return Err(PlatformError::new(PlatformErrorKind::Unauthorized, err.to_string()));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| PlatformError::decode(e.to_string()))?;
        match (body.access_token, body.error) {
            (Some(value), None) => {
                let lifetime = Duration::from_secs(body.expires_in.unwrap_or(3600));
                info!(username = %config.username, "Reddit session established");
                Ok(AccessToken {
                    value,
                    expires_at: Instant::now() + lifetime.saturating_sub(TOKEN_EXPIRY_MARGIN),
                })
            }
            (_, error) => Err(PlatformError::new(
                PlatformErrorKind::Unauthorized,
                format!("token exchange failed: {}", error.unwrap_or_default()),
            )),
        }
    }

    /// Sends an authorized request and maps failure statuses to error kinds.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<reqwest::Response, PlatformError> {
        let token = self.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PlatformError::transport(format!("{}: {}", what, e)))?;

        let status = response.status();
        debug!(request = %what, status = status.as_u16(), "Reddit response");
        if let Some(err) = PlatformError::from_status(status.as_u16(), format!("{} returned {}", what, status)) {
            if err.kind == PlatformErrorKind::Unauthorized {
                *self.inner.token.write().await = None;
            }
            return Err(err);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, PlatformError> {
        let request = self
            .inner
            .http
            .get(self.api_url(path))
            .query(query)
            .query(&[("raw_json", "1")]);
        self.send(request, path)
            .await?
            .json()
            .await
            .map_err(|e| PlatformError::decode(format!("{}: {}", path, e)))
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Value, PlatformError> {
        let request = self.inner.http.post(self.api_url(path)).form(form);
        let response = self.send(request, path).await?;
        let text = response
            .text()
            .await
            .map_err(|e| PlatformError::decode(format!("{}: {}", path, e)))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| PlatformError::decode(format!("{}: {}", path, e)))
    }

    /// Newest comments in `scope`, newest first.
    async fn comments_page(&self, scope: &str) -> Result<Vec<(String, CommentItem)>, PlatformError> {
        let listing: Listing = self
            .get_json(&format!("/r/{}/comments", scope), &[("limit", PAGE_LIMIT)])
            .await?;
        let comments = comments_from_children(listing.into_children())?;
        Ok(comments.into_iter().map(|c| (c.id.clone(), c)).collect())
    }

    /// Unread inbox items, newest first.
    async fn unread_page(&self) -> Result<Vec<(String, MentionItem)>, PlatformError> {
        let listing: Listing = self
            .get_json("/message/unread", &[("limit", PAGE_LIMIT)])
            .await?;
        listing
            .into_children()
            .into_iter()
            .map(|thing| mention_from_thing(thing).map(|m| (m.id.clone(), m)))
            .collect()
    }
}

/// Splits the `[post, comments]` listing pair returned by `/comments/{article}`.
fn split_comment_pages(mut pages: Vec<Listing>, article: &str) -> Result<(Listing, Listing), PlatformError> {
    if pages.len() != 2 {
        return Err(PlatformError::decode(format!(
            "/comments/{} returned {} listings, expected 2",
            article,
            pages.len()
        )));
    }
    let comments = pages.remove(1);
    let post = pages.remove(0);
    Ok((post, comments))
}

/// Parses `json.errors` of a write endpoint; the first entry becomes an `Api` error.
fn api_errors(body: &Value) -> Option<PlatformError> {
    let first = body.pointer("/json/errors")?.as_array()?.first()?;
    let code = first.get(0).and_then(Value::as_str).unwrap_or("UNKNOWN");
    let message = first.get(1).and_then(Value::as_str).unwrap_or("");
    Some(PlatformError::api(code, message))
}

#[async_trait]
impl PlatformClient for RedditClient {
    fn username(&self) -> &str {
        &self.inner.config.username
    }

    fn comment_stream(&self, scope: &str, skip_existing: bool) -> ItemStream<CommentItem> {
        let client = self.clone();
        let scope = scope.to_string();
        poll_stream(
            move || {
                let client = client.clone();
                let scope = scope.clone();
                async move { client.comments_page(&scope).await }
            },
            skip_existing,
            self.inner.poll,
        )
    }

    fn inbox_stream(&self) -> ItemStream<MentionItem> {
        let client = self.clone();
        poll_stream(
            move || {
                let client = client.clone();
                async move { client.unread_page().await }
            },
            false,
            self.inner.poll,
        )
    }

    #[instrument(skip(self))]
    async fn refresh(&self, id: &str) -> Result<CommentItem, PlatformError> {
        if id.starts_with("t3_") {
            let article = short_id(id);
            let pages: Vec<Listing> = self
                .get_json(&format!("/comments/{}", article), &[("depth", "1"), ("limit", REFRESH_LIMIT)])
                .await?;
            let (post, comments) = split_comment_pages(pages, article)?;
            let mut item = comments_from_children(post.into_children())?
                .into_iter()
                .next()
                .ok_or_else(|| PlatformError::new(PlatformErrorKind::NotFound, format!("{} not found", id)))?;
            item.replies = comments_from_children(comments.into_children())?;
            return Ok(item);
        }

        if !id.starts_with("t1_") {
            return Err(PlatformError::client(format!("cannot refresh {}: not a comment or submission", id)));
        }

        let info: Listing = self.get_json("/api/info", &[("id", id)]).await?;
        let thing = first_thing(info, id)?;
        let link_id = thing
            .link_id
            .clone()
            .ok_or_else(|| PlatformError::decode(format!("{} has no link_id", id)))?;
        let article = short_id(&link_id);

        let pages: Vec<Listing> = self
            .get_json(
                &format!("/comments/{}", article),
                &[("comment", short_id(id)), ("depth", "2"), ("limit", REFRESH_LIMIT)],
            )
            .await?;
        let (_, comments) = split_comment_pages(pages, article)?;
        comments_from_children(comments.into_children())?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| PlatformError::new(PlatformErrorKind::NotFound, format!("{} not found", id)))
    }

    #[instrument(skip(self, item, text), fields(thing_id = %item.id))]
    async fn reply(&self, item: &CommentItem, text: &str) -> Result<(), PlatformError> {
        let body = self
            .post_form(
                "/api/comment",
                &[("api_type", "json"), ("thing_id", item.id.as_str()), ("text", text)],
            )
            .await?;
        if let Some(err) = api_errors(&body) {
            warn!(error = %err, "Reddit rejected reply");
            return Err(err);
        }
        Ok(())
    }

    async fn mark_read(&self, items: &[MentionItem]) -> Result<(), PlatformError> {
        if items.is_empty() {
            return Ok(());
        }
        let ids = items
            .iter()
            .map(|m| m.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.post_form("/api/read_message", &[("id", ids.as_str())])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_errors_reads_first_entry() {
        let body = json!({"json": {"errors": [["RATELIMIT", "take a break", "ratelimit"]]}});
        let err = api_errors(&body).unwrap();
        assert_eq!(err.kind, PlatformErrorKind::Api);
        assert!(err.message.starts_with("RATELIMIT"));
    }

    #[test]
    fn test_api_errors_none_when_empty() {
        assert!(api_errors(&json!({"json": {"errors": []}})).is_none());
        assert!(api_errors(&Value::Null).is_none());
    }
}
