//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fixbot")]
#[command(about = "Repairs links broken by markdown escaping", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; --dry-run overrides REPLY_MODE).
    Run {
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the broken links in TEXT and the reply that would be posted.
    Check { text: String },
}
