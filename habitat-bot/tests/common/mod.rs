//! Mocks for driving the handler chain without Telegram or a trained model.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use classifier::{Classifier, ClassifierError, Prediction};
use habitat_bot::{build_handler_chain, BaseConfig, BotComponents, BotConfig, ClassifierConfig};
use habitat_core::{
    Bot, Chat, FileDownloader, GeoPoint, HabitatError, Message, MessageKind,
    PhotoAttachment, Result, User,
};
use handler_chain::HandlerChain;
use storage::SightingRepository;

/// Records every text sent, in order.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<(i64, String)>>,
}

impl MockBot {
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq)]
enum DownloadMode {
    Ok,
    FailResolve,
    FailMidway,
}

/// Resolves every file id to `photos/<id>.jpg` and writes fixed bytes on download.
pub struct MockDownloader {
    mode: DownloadMode,
    downloads: Mutex<Vec<PathBuf>>,
}

impl MockDownloader {
    fn with_mode(mode: DownloadMode) -> Self {
        Self {
            mode,
            downloads: Mutex::new(Vec::new()),
        }
    }

    pub fn new() -> Self {
        Self::with_mode(DownloadMode::Ok)
    }

    /// Fails before anything is written.
    pub fn failing() -> Self {
        Self::with_mode(DownloadMode::FailResolve)
    }

    /// Writes part of the file, then fails.
    pub fn failing_midway() -> Self {
        Self::with_mode(DownloadMode::FailMidway)
    }

    pub fn downloads(&self) -> Vec<PathBuf> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileDownloader for MockDownloader {
    async fn resolve_file_path(&self, file_id: &str) -> Result<String> {
        if self.mode == DownloadMode::FailResolve {
            return Err(HabitatError::Download("file is too big".to_string()));
        }
        Ok(format!("photos/{}.jpg", file_id))
    }

    async fn download(&self, _remote_path: &str, dest: &Path) -> Result<()> {
        if self.mode == DownloadMode::FailMidway {
            tokio::fs::write(dest, b"fake jp").await?;
            return Err(HabitatError::Download("connection reset".to_string()));
        }
        tokio::fs::write(dest, b"fake jpeg bytes").await?;
        self.downloads.lock().unwrap().push(dest.to_path_buf());
        Ok(())
    }
}

/// Returns a fixed prediction, or fails every call.
pub struct MockClassifier {
    prediction: Option<Prediction>,
}

impl MockClassifier {
    pub fn predicting(class_name: &str, probability: f32) -> Self {
        Self {
            prediction: Some(Prediction {
                index: 0,
                class_code: "parus_major".to_string(),
                class_name: class_name.to_string(),
                probability,
            }),
        }
    }

    pub fn failing() -> Self {
        Self { prediction: None }
    }
}

impl Classifier for MockClassifier {
    fn model_name(&self) -> &str {
        "ResNet50"
    }

    fn classify(&self, _image_path: &Path) -> std::result::Result<Prediction, ClassifierError> {
        self.prediction
            .clone()
            .ok_or_else(|| ClassifierError::Inference("model crashed".to_string()))
    }
}

/// A chain over a temp database and photos directory.
pub struct TestBot {
    pub dir: tempfile::TempDir,
    pub config: BotConfig,
    pub repo: SightingRepository,
    pub bot: Arc<MockBot>,
    pub downloader: Arc<MockDownloader>,
    pub chain: HandlerChain,
}

pub async fn setup(downloader: MockDownloader, classifier: MockClassifier) -> TestBot {
    let dir = tempfile::tempdir().unwrap();
    let photos_dir = dir.path().join("photos");
    std::fs::create_dir_all(&photos_dir).unwrap();
    let database_url = format!("file:{}", dir.path().join("habitat.db").display());

    let config = BotConfig {
        base: BaseConfig {
            bot_token: Some("test_token".to_string()),
            telegram_api_url: None,
            log_file: dir.path().join("bot.log").display().to_string(),
            database_url: database_url.clone(),
            photos_dir,
        },
        classifier: ClassifierConfig {
            model_path: PathBuf::from("russian_birds.onnx"),
            labels_path: PathBuf::from("russian_birds.txt"),
            model_name: "ResNet50".to_string(),
            input_size: 224,
            apply_softmax: true,
            threshold: 0.8,
        },
    };

    let repo = SightingRepository::new(&database_url).await.unwrap();
    let bot = Arc::new(MockBot::default());
    let downloader = Arc::new(downloader);
    let components = BotComponents {
        repo: repo.clone(),
        bot: bot.clone(),
        downloader: downloader.clone(),
        classifier: Arc::new(classifier),
    };
    let chain = build_handler_chain(&config, &components);

    TestBot {
        dir,
        config,
        repo,
        bot,
        downloader,
        chain,
    }
}

fn base_message(user_id: i64, kind: MessageKind, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: Some("birdwatcher".to_string()),
            first_name: Some("Anna".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        kind,
        created_at: Utc::now(),
        photo: None,
        location: None,
    }
}

pub fn command(user_id: i64, text: &str) -> Message {
    base_message(user_id, MessageKind::Command, text)
}

pub fn text(user_id: i64, text: &str) -> Message {
    base_message(user_id, MessageKind::Text, text)
}

pub fn photo(user_id: i64, file_id: &str) -> Message {
    let mut message = base_message(user_id, MessageKind::Photo, "");
    message.photo = Some(PhotoAttachment {
        file_id: file_id.to_string(),
        file_unique_id: format!("u_{}", file_id),
        width: 1280,
        height: 960,
    });
    message
}

pub fn location(user_id: i64, latitude: f64, longitude: f64) -> Message {
    let mut message = base_message(user_id, MessageKind::Location, "");
    message.location = Some(GeoPoint {
        latitude,
        longitude,
    });
    message
}
