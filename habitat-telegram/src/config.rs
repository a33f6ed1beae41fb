//! Minimal Telegram connection config and teloxide Bot construction.

use anyhow::{Context, Result};
use tracing::info;

/// Telegram connection settings (token and optional Bot API base URL).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

/// Builds a teloxide Bot, pointing it at `telegram_api_url` when set (e.g. a local Bot API server or a test mock).
pub fn build_teloxide_bot(config: &TelegramConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url {
        Some(ref url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            info!(url = %url, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}
