//! "Already answered" check over a comment's direct replies.

use fixbot_core::CommentItem;

/// Returns false iff some reply was written by the bot itself or by `other_bot`.
///
/// Only direct replies are inspected, and only as fresh as the caller's last refresh; two bot
/// instances refreshing at the same moment can both see no answer.
pub fn should_reply(replies: &[CommentItem], bot_username: &str, other_bot: Option<&str>) -> bool {
    !replies.iter().any(|reply| {
        reply.is_authored_by(bot_username)
            || other_bot.is_some_and(|other| reply.is_authored_by(other))
    })
}
