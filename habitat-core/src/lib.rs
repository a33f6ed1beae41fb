//! # habitat-core
//!
//! Core types and traits for the habitat monitoring bot: [`Bot`], [`FileDownloader`], [`Handler`],
//! message, attachment and user types, error types and tracing initialization. Transport-agnostic;
//! used by habitat-telegram, handler-chain and habitat-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, FileDownloader};
pub use error::{HabitatError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, GeoPoint, Handler, HandlerResponse, Message, MessageKind, PhotoAttachment, ToCoreMessage,
    ToCoreUser, User,
};
