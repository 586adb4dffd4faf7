//! Reply text rendering.

/// Opening of every reply, before the fixed links.
pub const REPLY_PREAMBLE: &str = "Hi, I noticed that some of your links might be broken for old reddit users.\n\
Here is my best attempt at fixing them:";

/// Attribution footer closing every reply.
pub const REPLY_FOOTER: &str = "I am a bot, beep boop.\n\
For more information on how I work, please visit my profile.";

/// Renders the reply for already-fixed URLs: preamble, the URLs separated by blank lines, footer.
pub fn compose_reply(fixed_urls: &[String]) -> String {
    format!(
        "\n{}\n\n{}\n\n{}\n",
        REPLY_PREAMBLE,
        fixed_urls.join("\n\n"),
        REPLY_FOOTER
    )
}
