//! # fixbot-reddit
//!
//! Reddit transport for the link-repair bot: OAuth password-grant session, polling comment and
//! inbox streams, thing refresh with direct replies, replying and mark-read. Implements
//! [`fixbot_core::PlatformClient`]; contains no link-repair logic.

mod adapters;
mod client;
mod config;
mod stream;

pub use client::RedditClient;
pub use config::RedditConfig;
pub use stream::{PollSettings, SeenSet};
