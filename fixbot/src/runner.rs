use std::sync::Arc;

use anyhow::{anyhow, Result};
use fixbot_core::{init_tracing, PlatformClient};
use fixbot_reddit::RedditClient;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::health;
use crate::processor::{StreamProcessor, StreamSource};

/// Main entry: validate config, init logging, log in, then run both processors and the
/// healthcheck until one of them fails.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    if let Some(dir) = std::path::Path::new(config.log_file()).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    init_tracing(Some(config.log_file()), config.base.platform_debug)?;

    info!(
        username = %config.username(),
        reply_mode = %config.reply_mode().as_str(),
        scope = %config.reply.comment_scope,
        "Initializing bot"
    );

    let client = RedditClient::new(config.base.reddit.clone())?;
    let listener = health::bind(config.base.server_port).await?;

    info!("Bot started successfully");
    run_with_client(Arc::new(client), &config, listener).await
}

/// Runs the comment processor, the mention processor and the healthcheck over `client`.
/// None of them ends in normal operation; the first one to stop decides the result.
#[instrument(skip(client, config, listener))]
pub async fn run_with_client(
    client: Arc<dyn PlatformClient>,
    config: &BotConfig,
    listener: TcpListener,
) -> Result<()> {
    let comments = StreamProcessor::new(client.clone(), &config.reply);
    let mentions = StreamProcessor::new(client, &config.reply);

    let mut comment_task = tokio::spawn(async move { comments.run(StreamSource::Comments).await });
    let mut mention_task = tokio::spawn(async move { mentions.run(StreamSource::Mentions).await });
    let mut health_task = tokio::spawn(health::serve(listener));

    let result = tokio::select! {
        joined = &mut comment_task => joined
            .map_err(|e| anyhow!("comment processor panicked: {e}"))
            .and_then(|r| r.map_err(anyhow::Error::from)),
        joined = &mut mention_task => joined
            .map_err(|e| anyhow!("mention processor panicked: {e}"))
            .and_then(|r| r.map_err(anyhow::Error::from)),
        joined = &mut health_task => joined
            .map_err(|e| anyhow!("healthcheck panicked: {e}"))
            .and_then(|r| r),
    };

    comment_task.abort();
    mention_task.abort();
    health_task.abort();

    if let Err(e) = &result {
        error!(error = %e, "Bot stopped");
    }
    result
}
