//! fixbot CLI: run the bot, or check a comment body offline. Config from env.

use anyhow::Result;
use clap::Parser;
use fixbot::{run_bot, BotConfig, Cli, Commands};
use fixbot_core::ReplyMode;
use link_repair::{compose_reply, find_broken_urls, fix_broken_urls};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { dry_run } => {
            let mode = dry_run.then_some(ReplyMode::DryRun);
            let config = BotConfig::load(mode)?;
            run_bot(config).await
        }
        Commands::Check { text } => {
            handle_check(&text);
            Ok(())
        }
    }
}

fn handle_check(text: &str) {
    let broken = find_broken_urls(text);
    if broken.is_empty() {
        println!("No broken links.");
        return;
    }

    println!("Broken link(s):");
    for url in &broken {
        println!("  {}", url);
    }
    println!("\nReply:{}", compose_reply(&fix_broken_urls(&broken)));
}
