//! BotConfig: BaseConfig + ClassifierConfig. Use load() for env-based loading.

use anyhow::Result;
use std::path::Path;

use super::{BaseConfig, ClassifierConfig};

/// Bot config: BaseConfig + classifier. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub classifier: ClassifierConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let classifier = ClassifierConfig::from_env()?;
        Ok(Self { base, classifier })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.classifier.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn classifier(&self) -> &ClassifierConfig {
        &self.classifier
    }

    /// BOT_TOKEN; error when unset.
    pub fn bot_token(&self) -> Result<&str> {
        self.base
            .bot_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN not set"))
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn photos_dir(&self) -> &Path {
        &self.base.photos_dir
    }
    pub fn threshold(&self) -> f32 {
        self.classifier.threshold
    }
}
