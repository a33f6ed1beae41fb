//! # habitat-bot
//!
//! Telegram bot for habitat monitoring: users send bird photos and geotags, the bot stores them
//! and identifies the species. Wires habitat-telegram, handler-chain, storage and classifier;
//! loads config from env and runs the REPL.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;

pub use cli::{Cli, Commands};
pub use components::{
    build_bot_components, build_handler_chain, load_classifier, open_repository,
    resolve_photos_dir, BotComponents,
};
pub use config::{BaseConfig, BotConfig, ClassifierConfig};
pub use handlers::{CommandHandler, LocationHandler, LoggingHandler, PhotoHandler};
pub use runner::{audit_photo_files, classify_image, format_stats, run_bot, sighting_stats};
