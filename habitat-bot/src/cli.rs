//! CLI parser.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "habitat-bot")]
#[command(about = "Habitat monitoring bot: run, classify, stats, audit", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Classify one image with the configured model and print the result.
    Classify { image: PathBuf },
    /// Print sighting statistics, optionally for one user.
    Stats {
        #[arg(short, long)]
        user_id: Option<i64>,
    },
    /// Mark sightings whose photo file no longer exists on disk.
    Audit {
        /// Directory relative photo paths are resolved against (where the bot ran).
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },
}
