//! Bot configuration: BaseConfig (Reddit session + log + healthcheck) + ReplyConfig (reply policy).

mod base;
mod bot_config;
mod reply;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use reply::ReplyConfig;
