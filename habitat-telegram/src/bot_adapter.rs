//! Wraps teloxide::Bot and implements [`habitat_core::Bot`] and [`habitat_core::FileDownloader`].
//! Production code talks to Telegram; tests substitute other impls.

use std::path::Path;

use async_trait::async_trait;
use habitat_core::{Bot as CoreBot, Chat, FileDownloader, HabitatError, Result};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements the core transport traits.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| HabitatError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl FileDownloader for TelegramBotAdapter {
    async fn resolve_file_path(&self, file_id: &str) -> Result<String> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| HabitatError::Download(e.to_string()))?;
        debug!(file_id = %file_id, remote_path = %file.path, "Resolved file path");
        Ok(file.path)
    }

    async fn download(&self, remote_path: &str, dest: &Path) -> Result<()> {
        let mut dst = tokio::fs::File::create(dest).await?;
        self.bot
            .download_file(remote_path, &mut dst)
            .await
            .map_err(|e| HabitatError::Download(e.to_string()))?;
        finish_file(dst).await?;
        Ok(())
    }
}

/// Flushes buffered writes and syncs the file so readers see its full length once this returns.
async fn finish_file(mut file: tokio::fs::File) -> std::io::Result<()> {
    file.flush().await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_finished_file_has_full_length() {
        let dir = tempfile::tempdir().unwrap();
        let chunk = vec![0xABu8; 16 * 1024];
        let total = 4 * 1024 * 1024;

        for i in 0..20 {
            let path = dir.path().join(format!("photo_{}.jpg", i));
            let mut file = tokio::fs::File::create(&path).await.unwrap();
            for _ in 0..total / chunk.len() {
                file.write_all(&chunk).await.unwrap();
            }
            finish_file(file).await.unwrap();

            assert_eq!(std::fs::metadata(&path).unwrap().len(), total as u64);
        }
    }
}
