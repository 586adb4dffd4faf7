//! BotConfig: BaseConfig + ReplyConfig. Use load() for env-based loading.

use anyhow::Result;
use fixbot_core::ReplyMode;

use super::{BaseConfig, ReplyConfig};

pub struct BotConfig {
    pub base: BaseConfig,
    pub reply: ReplyConfig,
}

impl BotConfig {
    /// Loads full config from environment variables. `reply_mode` overrides REPLY_MODE if given.
    /// Call validate() after load to check config before init.
    pub fn load(reply_mode: Option<ReplyMode>) -> Result<Self> {
        let base = BaseConfig::load()?;
        let mut reply = ReplyConfig::from_env()?;
        if let Some(mode) = reply_mode {
            reply.reply_mode = mode;
        }
        Ok(Self { base, reply })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.reply.validate()
    }

    pub fn username(&self) -> &str {
        &self.base.reddit.username
    }
    pub fn reply_mode(&self) -> ReplyMode {
        self.reply.reply_mode
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
}
