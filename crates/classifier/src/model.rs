//! Classifier abstraction. The bot depends on [`Classifier`]; tests substitute a fixed-answer impl.

use std::path::Path;

use crate::error::ClassifierError;
use crate::labels::LabelMap;
use crate::postprocess::{softmax, top_class};

/// Top-1 result for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub class_code: String,
    pub class_name: String,
    pub probability: f32,
}

/// Blocking image classifier. Callers on an async runtime run it via `spawn_blocking`.
pub trait Classifier: Send + Sync {
    /// Name stored alongside each result (e.g. `ResNet50`).
    fn model_name(&self) -> &str;
    fn classify(&self, image_path: &Path) -> Result<Prediction, ClassifierError>;
}

/// Maps raw model output to the top label. Applies softmax first when `apply_softmax` is set.
pub fn prediction_from_scores(
    scores: &[f32],
    labels: &LabelMap,
    apply_softmax: bool,
) -> Result<Prediction, ClassifierError> {
    if scores.len() != labels.len() {
        return Err(ClassifierError::LabelCountMismatch {
            outputs: scores.len(),
            labels: labels.len(),
        });
    }

    let probs = if apply_softmax {
        softmax(scores)
    } else {
        scores.to_vec()
    };
    let (index, probability) = top_class(&probs).ok_or(ClassifierError::NoLabels)?;
    let label = labels.get(index).ok_or(ClassifierError::LabelCountMismatch {
        outputs: scores.len(),
        labels: labels.len(),
    })?;

    Ok(Prediction {
        index,
        class_code: label.code.clone(),
        class_name: label.name.clone(),
        probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelMap {
        LabelMap::parse("parus_major: Большая синица\npica_pica: Сорока\npyrrhula: Снегирь").unwrap()
    }

    #[test]
    fn test_prediction_from_logits() {
        let prediction = prediction_from_scores(&[0.5, 4.0, 1.0], &labels(), true).unwrap();

        assert_eq!(prediction.index, 1);
        assert_eq!(prediction.class_code, "pica_pica");
        assert_eq!(prediction.class_name, "Сорока");
        assert!(prediction.probability > 0.9 && prediction.probability < 1.0);
    }

    #[test]
    fn test_prediction_from_probabilities() {
        let prediction = prediction_from_scores(&[0.1, 0.2, 0.7], &labels(), false).unwrap();

        assert_eq!(prediction.class_name, "Снегирь");
        assert!((prediction.probability - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_prediction_label_count_mismatch() {
        let err = prediction_from_scores(&[0.1, 0.9], &labels(), true).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::LabelCountMismatch {
                outputs: 2,
                labels: 3
            }
        ));
    }
}
