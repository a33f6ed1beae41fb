//! ONNX-backed classifier. The network is loaded once, optimized by tract and reused for every photo.

use std::path::{Path, PathBuf};

use tract_onnx::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::ClassifierError;
use crate::labels::LabelMap;
use crate::model::{prediction_from_scores, Classifier, Prediction};
use crate::preprocess::{load_image, to_input_tensor};

type Plan = TypedRunnableModel<TypedModel>;

/// Everything needed to build an [`OnnxClassifier`].
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub model_name: String,
    /// Side of the square input image, in pixels.
    pub input_size: u32,
    /// Set when the network outputs logits rather than probabilities.
    pub apply_softmax: bool,
}

pub struct OnnxClassifier {
    plan: Plan,
    labels: LabelMap,
    model_name: String,
    input_size: u32,
    apply_softmax: bool,
}

impl OnnxClassifier {
    #[instrument(skip(settings), fields(model = %settings.model_path.display()))]
    pub fn load(settings: &ClassifierSettings) -> Result<Self, ClassifierError> {
        let labels = LabelMap::load(&settings.labels_path)?;
        let plan = load_plan(&settings.model_path, settings.input_size)?;

        info!(
            model_name = %settings.model_name,
            classes = labels.len(),
            input_size = settings.input_size,
            "Classifier model loaded"
        );

        Ok(Self {
            plan,
            labels,
            model_name: settings.model_name.clone(),
            input_size: settings.input_size,
            apply_softmax: settings.apply_softmax,
        })
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    fn run(&self, data: Vec<f32>) -> TractResult<Vec<f32>> {
        let side = self.input_size as usize;
        let input = Tensor::from_shape(&[1, 3, side, side], &data)?;
        let outputs = self.plan.run(tvec!(input.into()))?;
        let first = outputs
            .first()
            .ok_or_else(|| anyhow::anyhow!("model returned no outputs"))?;
        let scores = first.to_array_view::<f32>()?.iter().copied().collect();
        Ok(scores)
    }
}

fn load_plan(path: &Path, input_size: u32) -> Result<Plan, ClassifierError> {
    let side = input_size as usize;
    let model_err = |e: TractError| ClassifierError::ModelLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    tract_onnx::onnx()
        .model_for_path(path)
        .and_then(|model| model.with_input_fact(0, f32::fact([1, 3, side, side]).into()))
        .and_then(|model| model.into_optimized())
        .and_then(|model| model.into_runnable())
        .map_err(model_err)
}

impl Classifier for OnnxClassifier {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    #[instrument(skip(self), fields(path = %image_path.display()))]
    fn classify(&self, image_path: &Path) -> Result<Prediction, ClassifierError> {
        let img = load_image(image_path)?;
        let data = to_input_tensor(&img, self.input_size);
        let scores = self
            .run(data)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let prediction = prediction_from_scores(&scores, &self.labels, self.apply_softmax)?;

        debug!(
            class_code = %prediction.class_code,
            probability = prediction.probability,
            "Image classified"
        );
        Ok(prediction)
    }
}
