//! Attaches a geotag to the user's latest untagged photo.

use std::sync::Arc;

use async_trait::async_trait;
use habitat_core::{Bot, Handler, HandlerResponse, Message, Result};
use storage::SightingRepository;
use tracing::{error, info, instrument};

use super::replies;

pub struct LocationHandler {
    repo: SightingRepository,
    bot: Arc<dyn Bot>,
}

impl LocationHandler {
    pub fn new(repo: SightingRepository, bot: Arc<dyn Bot>) -> Self {
        Self { repo, bot }
    }
}

#[async_trait]
impl Handler for LocationHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(point) = message.location else {
            return Ok(HandlerResponse::Ignore);
        };
        let user_id = message.user.id;

        let text = match self
            .repo
            .tag_latest_untagged(user_id, point.latitude, point.longitude)
            .await
        {
            Ok(Some(id)) => {
                info!(user_id = user_id, sighting_id = id, "step: LocationHandler geotag saved");
                replies::location_saved(point.latitude, point.longitude)
            }
            Ok(None) => {
                info!(user_id = user_id, "step: LocationHandler no untagged photo");
                replies::PHOTO_FIRST.to_string()
            }
            Err(e) => {
                error!(error = %e, user_id = user_id, "Failed to save geotag");
                replies::LOCATION_SAVE_FAILED.to_string()
            }
        };

        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}
