use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to read labels file {path}: {source}")]
    LabelsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid label on line {line}: {content:?} (expected `code: name`)")]
    InvalidLabel { line: usize, content: String },

    #[error("Labels file is empty")]
    NoLabels,

    #[error("Failed to load image {path}: {message}")]
    Image { path: PathBuf, message: String },

    #[error("Failed to load model {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model produced {outputs} scores but {labels} labels are defined")]
    LabelCountMismatch { outputs: usize, labels: usize },
}
