//! Handles `/start`, `/help` and `/stats`; other commands fall through.

use std::sync::Arc;

use async_trait::async_trait;
use habitat_core::{Bot, Handler, HandlerResponse, Message, MessageKind, Result};
use storage::SightingRepository;
use tracing::{error, info, instrument};

use super::replies;

pub struct CommandHandler {
    repo: SightingRepository,
    bot: Arc<dyn Bot>,
}

impl CommandHandler {
    pub fn new(repo: SightingRepository, bot: Arc<dyn Bot>) -> Self {
        Self { repo, bot }
    }

    async fn stats_text(&self, user_id: i64) -> String {
        match self.repo.get_stats(Some(user_id)).await {
            Ok(stats) => replies::stats(
                stats.total,
                stats.identified,
                stats.classified,
                stats.geotagged,
            ),
            Err(e) => {
                error!(error = %e, user_id = user_id, "Failed to load stats");
                replies::STATS_FAILED.to_string()
            }
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Command {
            return Ok(HandlerResponse::Ignore);
        }
        let Some(command) = message.command() else {
            return Ok(HandlerResponse::Ignore);
        };

        let text = match command {
            "start" => replies::START.to_string(),
            "help" => replies::HELP.to_string(),
            "stats" => self.stats_text(message.user.id).await,
            _ => return Ok(HandlerResponse::Ignore),
        };

        info!(user_id = message.user.id, command = %command, "step: CommandHandler replying");
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}
