//! habitat-bot binary: run the bot, or inspect the model and the database offline.

use anyhow::Result;
use clap::Parser;
use habitat_bot::{
    audit_photo_files, classify_image, format_stats, run_bot, sighting_stats, BotConfig, Cli,
    Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
        Commands::Classify { image } => {
            init_console_tracing();
            let config = BotConfig::load(None)?;
            println!("{}", classify_image(&config, &image)?);
            Ok(())
        }
        Commands::Stats { user_id } => {
            init_console_tracing();
            let config = BotConfig::load(None)?;
            let stats = sighting_stats(&config, user_id).await?;
            println!("{}", format_stats(&stats));
            Ok(())
        }
        Commands::Audit { base_dir } => {
            init_console_tracing();
            let config = BotConfig::load(None)?;
            let marked = audit_photo_files(&config, &base_dir).await?;
            println!("Marked missing: {}", marked);
            Ok(())
        }
    }
}

fn init_console_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_target(false)
        .init();
}
