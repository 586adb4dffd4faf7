pub mod mock_platform;

use fixbot_core::{CommentItem, MentionItem};

pub const BOT_NAME: &str = "fixbot";

pub fn comment(id: &str, body: &str) -> CommentItem {
    CommentItem {
        id: id.to_string(),
        body: body.to_string(),
        author: Some("someone".to_string()),
        subreddit: "rust".to_string(),
        permalink: format!("/r/rust/comments/abc/x/{}/", id.trim_start_matches("t1_")),
        replies: vec![],
    }
}

pub fn reply_by(id: &str, author: &str) -> CommentItem {
    CommentItem {
        author: Some(author.to_string()),
        ..comment(id, "thanks")
    }
}

pub fn mention(id: &str, parent_id: Option<&str>) -> MentionItem {
    MentionItem {
        id: id.to_string(),
        author: Some("caller".to_string()),
        subreddit: Some("rust".to_string()),
        parent_id: parent_id.map(str::to_string),
        body: format!("u/{}", BOT_NAME),
    }
}
