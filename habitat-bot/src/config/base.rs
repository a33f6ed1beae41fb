//! Base config: Telegram Bot connection, logging, database, photo directory. Loaded from env.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Base config: Telegram-related, logging, storage only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN; only the `run` command needs it.
    pub bot_token: Option<String>,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// Sightings database (SQLite file path, `file:` / `sqlite:` URL)
    pub database_url: String,
    /// Directory downloaded photos are written to
    pub photos_dir: PathBuf,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .or_else(|| env::var("BOT_TOKEN").ok())
            .filter(|t| !t.trim().is_empty());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "habitat_monitoring.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/habitat-bot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let photos_dir = PathBuf::from(env::var("PHOTOS_DIR").unwrap_or_else(|_| "photos".to_string()));

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            database_url,
            photos_dir,
        })
    }

    /// Validate config (telegram_api_url must be a valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
