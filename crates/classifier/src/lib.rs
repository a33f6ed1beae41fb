//! # classifier
//!
//! Identifies the bird species on a photo with a pre-trained image model.
//!
//! - [`labels`] – class code → readable name map, in model output order
//! - [`preprocess`] – decode, center-crop, resize and normalize into an NCHW tensor buffer
//! - [`postprocess`] – softmax, top class, confidence threshold, percent formatting
//! - [`model`] – [`Classifier`] trait and [`Prediction`]
//! - [`onnx`] – [`OnnxClassifier`] running an ONNX export through tract

mod error;
pub mod labels;
pub mod model;
pub mod onnx;
pub mod postprocess;
pub mod preprocess;

pub use error::ClassifierError;
pub use labels::{Label, LabelMap};
pub use model::{prediction_from_scores, Classifier, Prediction};
pub use onnx::{ClassifierSettings, OnnxClassifier};
pub use postprocess::{format_percent, is_confident, softmax, top_class};
