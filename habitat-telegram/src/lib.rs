//! # habitat-telegram
//!
//! Telegram layer: adapters from teloxide types, [`habitat_core::Bot`] and
//! [`habitat_core::FileDownloader`] implementation, bot construction, REPL runner.
//! Handles only Telegram connectivity and handler-chain execution; no persistence or classification.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{largest_photo, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{build_teloxide_bot, TelegramConfig};
pub use runner::run_repl;
