//! Config tests.

use crate::config::BotConfig;
use fixbot_core::ReplyMode;
use serial_test::serial;
use std::env;
use std::time::Duration;

const OPTIONAL_VARS: &[&str] = &[
    "REDDIT_API_URL",
    "REDDIT_AUTH_URL",
    "LOG_FILE",
    "SERVER_PORT",
    "PLATFORM_DEBUG_LOG",
    "REPLY_MODE",
    "SETTLE_DELAY_SECS",
    "RETRY_DELAY_SECS",
    "OTHER_BOT_ACCOUNT",
    "COMMENT_SCOPE",
];

fn set_required_vars() {
    env::set_var("REDDIT_CLIENT_ID", "id");
    env::set_var("REDDIT_CLIENT_SECRET", "secret");
    env::set_var("REDDIT_USERNAME", "linkfixbot");
    env::set_var("REDDIT_PASSWORD", "hunter2");
    env::set_var("REDDIT_USER_AGENT", "linux:fixbot:0.1 (by u/linkfixbot)");
    for name in OPTIONAL_VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    set_required_vars();

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.username(), "linkfixbot");
    assert_eq!(config.log_file(), "logs/fixbot.log");
    assert_eq!(config.base.server_port, 8080);
    assert!(!config.base.platform_debug);
    assert_eq!(config.reply_mode(), ReplyMode::DryRun);
    assert_eq!(config.reply.settle_delay, Duration::from_secs(120));
    assert_eq!(config.reply.retry_delay, Duration::from_secs(60));
    assert_eq!(config.reply.other_bot_account.as_deref(), Some("underscorebot"));
    assert_eq!(config.reply.comment_scope, "all");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    set_required_vars();
    env::set_var("REPLY_MODE", "REPLY");
    env::set_var("SETTLE_DELAY_SECS", "5");
    env::set_var("RETRY_DELAY_SECS", "7");
    env::set_var("OTHER_BOT_ACCOUNT", "");
    env::set_var("COMMENT_SCOPE", "rust+programming");
    env::set_var("SERVER_PORT", "9000");
    env::set_var("PLATFORM_DEBUG_LOG", "TRUE");
    env::set_var("LOG_FILE", "/tmp/fixbot.log");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.reply_mode(), ReplyMode::Live);
    assert_eq!(config.reply.settle_delay, Duration::from_secs(5));
    assert_eq!(config.reply.retry_delay, Duration::from_secs(7));
    assert!(config.reply.other_bot_account.is_none());
    assert_eq!(config.reply.comment_scope, "rust+programming");
    assert_eq!(config.base.server_port, 9000);
    assert!(config.base.platform_debug);
    assert_eq!(config.log_file(), "/tmp/fixbot.log");

    for name in OPTIONAL_VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_load_config_with_override_mode() {
    set_required_vars();
    env::set_var("REPLY_MODE", "reply");

    let config = BotConfig::load(Some(ReplyMode::DryRun)).unwrap();

    assert_eq!(config.reply_mode(), ReplyMode::DryRun);
    env::remove_var("REPLY_MODE");
}

#[test]
#[serial]
fn test_load_config_rejects_bad_numbers() {
    set_required_vars();
    env::set_var("SETTLE_DELAY_SECS", "two minutes");

    let err = BotConfig::load(None).err().unwrap();
    assert!(err.to_string().contains("SETTLE_DELAY_SECS"));
    env::remove_var("SETTLE_DELAY_SECS");

    env::set_var("SERVER_PORT", "http");
    assert!(BotConfig::load(None).is_err());
    env::remove_var("SERVER_PORT");
}

#[test]
#[serial]
fn test_validate_rejects_empty_scope() {
    set_required_vars();
    env::set_var("COMMENT_SCOPE", " ");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    env::remove_var("COMMENT_SCOPE");
}
