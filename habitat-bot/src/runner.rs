//! Bot entry point and the offline operations behind the CLI subcommands.

use std::path::Path;

use anyhow::Result;
use classifier::{format_percent, is_confident, Classifier};
use habitat_core::init_tracing;
use habitat_telegram::run_repl;
use storage::SightingStats;
use tracing::{info, instrument};

use crate::components::{
    build_bot_components, build_handler_chain, load_classifier, open_repository,
    resolve_photos_dir,
};
use crate::config::BotConfig;

/// Main entry: validate config, init logging, build components and handler chain, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(mut config: BotConfig) -> Result<()> {
    config.validate()?;
    config.bot_token()?;
    init_tracing(config.log_file())?;
    config.base.photos_dir = resolve_photos_dir(config.photos_dir())?;

    info!(
        database_url = %config.database_url(),
        photos_dir = %config.photos_dir().display(),
        threshold = config.threshold(),
        "Initializing bot"
    );

    let (teloxide_bot, components) = build_bot_components(&config).await?;
    let handler_chain = build_handler_chain(&config, &components);

    info!("Bot started successfully");

    run_repl(teloxide_bot, handler_chain).await
}

/// Classifies one image file with the configured model and returns the line to print.
pub fn classify_image(config: &BotConfig, image: &Path) -> Result<String> {
    config.classifier().validate()?;
    let classifier = load_classifier(config)?;
    let prediction = classifier.classify(image)?;
    let verdict = if is_confident(prediction.probability, config.threshold()) {
        "identified"
    } else {
        "below threshold"
    };
    Ok(format!(
        "{}: {} ({}) {}% [{}]",
        image.display(),
        prediction.class_name,
        prediction.class_code,
        format_percent(prediction.probability),
        verdict
    ))
}

/// Reads sighting statistics, for one user or for everyone.
pub async fn sighting_stats(config: &BotConfig, user_id: Option<i64>) -> Result<SightingStats> {
    let repo = open_repository(config).await?;
    Ok(repo.get_stats(user_id).await?)
}

/// Flags rows whose photo file is gone. Relative paths stored by older runs resolve against
/// `base_dir`. Returns how many rows changed.
pub async fn audit_photo_files(config: &BotConfig, base_dir: &Path) -> Result<u64> {
    let repo = open_repository(config).await?;
    Ok(repo.mark_missing_files(base_dir).await?)
}

/// Renders statistics for the terminal.
pub fn format_stats(stats: &SightingStats) -> String {
    let when = |t: Option<chrono::NaiveDateTime>| {
        t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "Sightings: {}\nClassified: {}\nIdentified: {}\nGeotagged: {}\nUsers: {}\nFirst: {}\nLast: {}",
        stats.total,
        stats.classified,
        stats.identified,
        stats.geotagged,
        stats.unique_users,
        when(stats.first_sighting),
        when(stats.last_sighting)
    )
}
