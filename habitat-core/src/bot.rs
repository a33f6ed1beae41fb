//! Transport abstractions for replying to users and fetching their files.
//!
//! [`Bot`] and [`FileDownloader`] are transport-agnostic; habitat-telegram implements both via teloxide.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;
use std::path::Path;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}

/// Fetches files users attached to their messages.
#[async_trait]
pub trait FileDownloader: Send + Sync {
    /// Resolves a file id to the transport's remote path (e.g. `photos/file_12.jpg`).
    async fn resolve_file_path(&self, file_id: &str) -> Result<String>;
    /// Downloads the remote file into `dest`, creating or truncating it.
    async fn download(&self, remote_path: &str, dest: &Path) -> Result<()>;
}
