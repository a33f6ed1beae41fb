//! Bot configuration: BaseConfig (Telegram + log + DB + photo storage) + ClassifierConfig.

mod base;
mod bot_config;
mod classifier;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use classifier::ClassifierConfig;
