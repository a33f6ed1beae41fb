//! Classifier config: model and labels files, model name, input size, confidence threshold.

use anyhow::{Context, Result};
use classifier::ClassifierSettings;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// CLASSIFIER_MODEL_PATH
    pub model_path: PathBuf,
    /// CLASSIFIER_LABELS_PATH
    pub labels_path: PathBuf,
    /// CLASSIFIER_MODEL_NAME; stored with every classification
    pub model_name: String,
    /// CLASSIFIER_INPUT_SIZE
    pub input_size: u32,
    /// CLASSIFIER_APPLY_SOFTMAX
    pub apply_softmax: bool,
    /// CLASSIFICATION_THRESHOLD; a prediction counts as identified when strictly above it
    pub threshold: f32,
}

fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

impl ClassifierConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            model_path: PathBuf::from(
                env::var("CLASSIFIER_MODEL_PATH").unwrap_or_else(|_| "russian_birds.onnx".to_string()),
            ),
            labels_path: PathBuf::from(
                env::var("CLASSIFIER_LABELS_PATH").unwrap_or_else(|_| "russian_birds.txt".to_string()),
            ),
            model_name: env::var("CLASSIFIER_MODEL_NAME").unwrap_or_else(|_| "ResNet50".to_string()),
            input_size: parse_env("CLASSIFIER_INPUT_SIZE", 224)?,
            apply_softmax: parse_env("CLASSIFIER_APPLY_SOFTMAX", true)?,
            threshold: parse_env("CLASSIFICATION_THRESHOLD", 0.8)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!(
                "CLASSIFICATION_THRESHOLD must be within [0, 1], got {}",
                self.threshold
            );
        }
        if self.input_size == 0 {
            anyhow::bail!("CLASSIFIER_INPUT_SIZE must be positive");
        }
        Ok(())
    }

    pub fn settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            model_path: self.model_path.clone(),
            labels_path: self.labels_path.clone(),
            model_name: self.model_name.clone(),
            input_size: self.input_size,
            apply_softmax: self.apply_softmax,
        }
    }
}
