//! # fixbot application
//!
//! Watches the comment feed and the inbox, finds links broken by markdown escaping, and posts one
//! corrective reply per comment. Wires link-repair (text pipeline), fixbot-reddit (transport) and
//! the processors here; loads config from env and runs until the process is stopped.

pub mod cli;
pub mod config;
pub mod dedup;
pub mod dispatcher;
pub mod health;
pub mod processor;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::{BaseConfig, BotConfig, ReplyConfig};
pub use dedup::should_reply;
pub use dispatcher::{
    classify, DispatchError, DispatchOutcome, FailureClass, ReplyDispatcher, RetryOutcome,
};
pub use processor::{ItemOutcome, ProcessError, StreamProcessor, StreamSource};
pub use runner::{run_bot, run_with_client};
