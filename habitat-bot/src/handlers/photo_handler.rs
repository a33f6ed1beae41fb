//! Photo intake: duplicate check, download, persist, classify, answer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use classifier::{format_percent, is_confident, Classifier, Prediction};
use habitat_core::{
    Bot, FileDownloader, HabitatError, Handler, HandlerResponse, Message, PhotoAttachment, Result,
};
use storage::{ClassificationOutcome, NewSighting, SightingRepository};
use tracing::{error, info, instrument, warn};

use super::replies;

const FALLBACK_EXTENSION: &str = "jpg";

/// Extension of a Bot API file path (`photos/file_3.jpg` → `jpg`), `jpg` when there is none.
pub fn file_extension(remote_path: &str) -> &str {
    let name = remote_path.rsplit('/').next().unwrap_or(remote_path);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => ext,
        _ => FALLBACK_EXTENSION,
    }
}

/// Where a photo is stored locally: `<photos_dir>/<file_id>.<ext>`.
/// Characters outside `[A-Za-z0-9_-]` in the id are replaced with `_`.
pub fn local_photo_path(photos_dir: &Path, file_id: &str, remote_path: &str) -> PathBuf {
    let stem: String = file_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    photos_dir.join(format!("{}.{}", stem, file_extension(remote_path)))
}

/// Removes a photo that has no row; a file that was never created is fine.
async fn discard_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => warn!(path = %path.display(), "Removed photo without a stored row"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(error = %e, path = %path.display(), "Failed to remove orphaned photo"),
    }
}

pub struct PhotoHandler {
    repo: SightingRepository,
    bot: Arc<dyn Bot>,
    downloader: Arc<dyn FileDownloader>,
    classifier: Arc<dyn Classifier>,
    photos_dir: PathBuf,
    threshold: f32,
}

impl PhotoHandler {
    pub fn new(
        repo: SightingRepository,
        bot: Arc<dyn Bot>,
        downloader: Arc<dyn FileDownloader>,
        classifier: Arc<dyn Classifier>,
        photos_dir: PathBuf,
        threshold: f32,
    ) -> Self {
        Self {
            repo,
            bot,
            downloader,
            classifier,
            photos_dir,
            threshold,
        }
    }

    /// Downloads the photo and inserts its row. Returns the local path.
    async fn save(&self, user_id: i64, photo: &PhotoAttachment) -> Result<PathBuf> {
        let remote_path = self.downloader.resolve_file_path(&photo.file_id).await?;
        let local_path = local_photo_path(&self.photos_dir, &photo.file_id, &remote_path);
        info!(
            user_id = user_id,
            photo_id = %photo.file_id,
            path = %local_path.display(),
            "step: PhotoHandler downloading"
        );
        if let Err(e) = self.store(user_id, photo, &remote_path, &local_path).await {
            discard_file(&local_path).await;
            return Err(e);
        }
        Ok(local_path)
    }

    async fn store(
        &self,
        user_id: i64,
        photo: &PhotoAttachment,
        remote_path: &str,
        local_path: &Path,
    ) -> Result<()> {
        self.downloader.download(remote_path, local_path).await?;

        let sighting = NewSighting {
            user_id,
            photo_id: photo.file_id.clone(),
            photo_path: local_path.to_string_lossy().into_owned(),
        };
        self.repo
            .insert(&sighting)
            .await
            .map_err(|e| HabitatError::Database(e.to_string()))?;
        Ok(())
    }

    async fn classify(&self, path: PathBuf) -> Result<Prediction> {
        let classifier = Arc::clone(&self.classifier);
        let joined = tokio::task::spawn_blocking(move || classifier.classify(&path))
            .await
            .map_err(|e| HabitatError::Classification(e.to_string()))?;
        joined.map_err(|e| HabitatError::Classification(e.to_string()))
    }

    async fn store_outcome(
        &self,
        user_id: i64,
        photo_id: &str,
        prediction: &Prediction,
    ) -> Result<String> {
        let success = is_confident(prediction.probability, self.threshold);
        let outcome = ClassificationOutcome {
            model: self.classifier.model_name().to_string(),
            class_name: prediction.class_name.clone(),
            probability: f64::from(prediction.probability),
            success,
        };
        self.repo
            .record_classification(user_id, photo_id, &outcome)
            .await
            .map_err(|e| HabitatError::Database(e.to_string()))?;

        Ok(if success {
            replies::identified(&prediction.class_name, &format_percent(prediction.probability))
        } else {
            replies::NOT_IDENTIFIED.to_string()
        })
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}

#[async_trait]
impl Handler for PhotoHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(photo) = message.photo.as_ref() else {
            return Ok(HandlerResponse::Ignore);
        };
        let user_id = message.user.id;

        match self.repo.exists(user_id, &photo.file_id).await {
            Ok(true) => {
                info!(user_id = user_id, photo_id = %photo.file_id, "Duplicate photo");
                return self.reply(message, replies::DUPLICATE_PHOTO.to_string()).await;
            }
            Ok(false) => {}
            Err(e) => {
                error!(error = %e, user_id = user_id, "Duplicate check failed");
                return self.reply(message, replies::PHOTO_SAVE_FAILED.to_string()).await;
            }
        }

        let local_path = match self.save(user_id, photo).await {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, user_id = user_id, photo_id = %photo.file_id, "Failed to save photo");
                return self.reply(message, replies::PHOTO_SAVE_FAILED.to_string()).await;
            }
        };
        self.bot.reply_to(message, replies::PHOTO_SAVED).await?;

        let prediction = match self.classify(local_path).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(error = %e, user_id = user_id, photo_id = %photo.file_id, "Classification failed");
                return Ok(HandlerResponse::Reply(replies::PHOTO_SAVED.to_string()));
            }
        };
        info!(
            user_id = user_id,
            photo_id = %photo.file_id,
            class_code = %prediction.class_code,
            probability = prediction.probability,
            "step: PhotoHandler classified"
        );

        let text = match self.store_outcome(user_id, &photo.file_id, &prediction).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, user_id = user_id, "Failed to store classification");
                replies::PHOTO_SAVE_FAILED.to_string()
            }
        };
        self.reply(message, text).await
    }
}
