//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use classifier::{Classifier, OnnxClassifier};
use habitat_core::{Bot, FileDownloader};
use habitat_telegram::{build_teloxide_bot, TelegramBotAdapter, TelegramConfig};
use handler_chain::HandlerChain;
use storage::SightingRepository;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::handlers::{CommandHandler, LocationHandler, LoggingHandler, PhotoHandler};

/// Dependencies shared by the handlers. Tests build it with mock transports and classifiers.
#[derive(Clone)]
pub struct BotComponents {
    pub repo: SightingRepository,
    pub bot: Arc<dyn Bot>,
    pub downloader: Arc<dyn FileDownloader>,
    pub classifier: Arc<dyn Classifier>,
}

/// Opens the sighting database, migrating a legacy table.
#[instrument(skip(config))]
pub async fn open_repository(config: &BotConfig) -> Result<SightingRepository> {
    SightingRepository::new(config.database_url())
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url(),
                "Failed to initialize sighting storage"
            );
            anyhow::anyhow!("Failed to initialize sighting storage: {}", e)
        })
}

/// Loads the ONNX model and its labels.
#[instrument(skip(config))]
pub fn load_classifier(config: &BotConfig) -> Result<OnnxClassifier> {
    let settings = config.classifier().settings();
    OnnxClassifier::load(&settings).with_context(|| {
        format!(
            "Failed to load classifier model {}",
            settings.model_path.display()
        )
    })
}

/// Creates the photos directory and returns its absolute path, so stored photo paths do not
/// depend on the working directory of later commands.
pub fn resolve_photos_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create photos directory {}", dir.display()))?;
    std::fs::canonicalize(dir)
        .with_context(|| format!("Failed to resolve photos directory {}", dir.display()))
}

/// Builds the teloxide Bot and every component the handler chain needs.
/// Expects `photos_dir` to exist (see [`resolve_photos_dir`]).
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<(teloxide::Bot, BotComponents)> {
    let repo = open_repository(config).await?;
    let classifier: Arc<dyn Classifier> = Arc::new(load_classifier(config)?);

    let telegram_config = TelegramConfig {
        bot_token: config.bot_token()?.to_string(),
        telegram_api_url: config.telegram_api_url().map(str::to_string),
    };
    let teloxide_bot = build_teloxide_bot(&telegram_config)?;
    let adapter = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    info!(
        photos_dir = %config.photos_dir().display(),
        model_name = %classifier.model_name(),
        "Bot components ready"
    );

    Ok((
        teloxide_bot,
        BotComponents {
            repo,
            bot: adapter.clone(),
            downloader: adapter,
            classifier,
        },
    ))
}

/// Builds the handler chain (logging → commands → photo → location).
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let photo_handler = PhotoHandler::new(
        components.repo.clone(),
        components.bot.clone(),
        components.downloader.clone(),
        components.classifier.clone(),
        config.photos_dir().to_path_buf(),
        config.threshold(),
    );

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CommandHandler::new(
            components.repo.clone(),
            components.bot.clone(),
        )))
        .add_handler(Arc::new(photo_handler))
        .add_handler(Arc::new(LocationHandler::new(
            components.repo.clone(),
            components.bot.clone(),
        )))
}
