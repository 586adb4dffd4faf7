//! Adapters from Reddit listing JSON to fixbot_core types.

use fixbot_core::{CommentItem, MentionItem, PlatformError, PlatformErrorKind};
use serde::Deserialize;
use serde_json::Value;

/// `{"kind": "Listing", "data": {"children": [...]}}`
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

/// One child of a listing. Kinds are mixed (`t1`, `t3`, `t4`, `more`), so data stays untyped
/// until the kind is known.
#[derive(Debug, Deserialize)]
pub(crate) struct Thing {
    pub kind: String,
    pub data: Value,
}

/// Fields shared by comments (`t1`) and submissions (`t3`).
#[derive(Debug, Deserialize)]
pub(crate) struct ThingData {
    pub name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub link_id: Option<String>,
    /// Empty string when there are no replies, otherwise a listing.
    #[serde(default)]
    pub replies: Value,
}

/// Inbox item (`t1` mention / comment reply or `t4` private message).
#[derive(Debug, Deserialize)]
pub(crate) struct InboxData {
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub was_comment: bool,
    #[serde(default)]
    pub body: String,
}

/// Reddit reports deleted accounts as `[deleted]`.
fn normalize_author(author: Option<String>) -> Option<String> {
    author.filter(|a| a != "[deleted]" && !a.is_empty())
}

/// Strips the `t1_` / `t3_` type prefix from a fullname.
pub(crate) fn short_id(fullname: &str) -> &str {
    fullname.split_once('_').map(|(_, id)| id).unwrap_or(fullname)
}

fn decode<T: for<'de> Deserialize<'de>>(value: Value, what: &str) -> Result<T, PlatformError> {
    serde_json::from_value(value).map_err(|e| PlatformError::decode(format!("{}: {}", what, e)))
}

impl Listing {
    pub fn into_children(self) -> Vec<Thing> {
        self.data.children
    }
}

impl ThingData {
    /// Converts to a core item. Replies are taken from the embedded listing, `more` stubs dropped.
    pub fn into_comment(self) -> Result<CommentItem, PlatformError> {
        let replies = match self.replies {
            Value::Object(_) => {
                let listing: Listing = decode(self.replies, "replies listing")?;
                comments_from_children(listing.into_children())?
            }
            _ => Vec::new(),
        };
        Ok(CommentItem {
            id: self.name,
            body: self.body.or(self.selftext).unwrap_or_default(),
            author: normalize_author(self.author),
            subreddit: self.subreddit,
            permalink: self.permalink,
            replies,
        })
    }
}

/// Decodes comment and submission children, skipping `more` placeholders.
pub(crate) fn comments_from_children(children: Vec<Thing>) -> Result<Vec<CommentItem>, PlatformError> {
    children
        .into_iter()
        .filter(|thing| thing.kind == "t1" || thing.kind == "t3")
        .map(|thing| decode::<ThingData>(thing.data, "comment")?.into_comment())
        .collect()
}

/// First child of an `/api/info` listing as raw data (keeps `link_id`).
pub(crate) fn first_thing(listing: Listing, id: &str) -> Result<ThingData, PlatformError> {
    let thing = listing
        .into_children()
        .into_iter()
        .next()
        .ok_or_else(|| PlatformError::new(PlatformErrorKind::NotFound, format!("{} not found", id)))?;
    decode(thing.data, "thing")
}

/// Converts an inbox child. Private messages carry no parent to repair.
pub(crate) fn mention_from_thing(thing: Thing) -> Result<MentionItem, PlatformError> {
    let data: InboxData = decode(thing.data, "inbox item")?;
    let parent_id = if data.was_comment { data.parent_id } else { None };
    Ok(MentionItem {
        id: data.name,
        author: normalize_author(data.author),
        subreddit: data.subreddit,
        parent_id,
        body: data.body,
    })
}
