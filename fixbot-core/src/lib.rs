//! # fixbot-core
//!
//! Core types and traits for the link-repair bot: [`PlatformClient`], comment and mention items,
//! the platform error taxonomy, and tracing initialization. Transport-agnostic; used by
//! fixbot-reddit and the fixbot application.

pub mod error;
pub mod logger;
pub mod platform;
pub mod types;

pub use error::{PlatformError, PlatformErrorKind};
pub use logger::init_tracing;
pub use platform::{ItemStream, PlatformClient};
pub use types::{CommentItem, MentionItem, ReplyMode};
