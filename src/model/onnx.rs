use ndarray::Array2;
use std::path::Path;
use tract_onnx::prelude::*;

use super::error::ModelError;
use super::session::InferenceSession;
use crate::features::FEATURE_COUNT;

/// ONNX graph run through tract. The batch dimension is left symbolic in
/// the artifact, so each call pins it to the actual row count and plans
/// the graph for that shape.
#[derive(Debug, Clone)]
pub struct OnnxSession {
    input_name: String,
    output_name: String,
    model: InferenceModel,
}

impl OnnxSession {
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let model = tract_onnx::onnx().model_for_path(path).map_err(runtime)?;

        let input = *model
            .input_outlets()
            .map_err(runtime)?
            .first()
            .ok_or_else(|| ModelError::Shape("model declares no inputs".to_string()))?;
        let output = *model
            .output_outlets()
            .map_err(runtime)?
            .first()
            .ok_or_else(|| ModelError::Shape("model declares no outputs".to_string()))?;

        let input_name = model.node(input.node).name.clone();
        let output_name = model
            .outlet_label(output)
            .map(str::to_string)
            .unwrap_or_else(|| model.node(output.node).name.clone());

        Ok(Self {
            input_name,
            output_name,
            model,
        })
    }
}

impl InferenceSession for OnnxSession {
    fn input_name(&self) -> &str {
        &self.input_name
    }

    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn run(&self, input: Array2<f32>) -> Result<Vec<f32>, ModelError> {
        let (rows, cols) = input.dim();
        if cols != FEATURE_COUNT {
            return Err(ModelError::Shape(format!(
                "input '{}' expects {} columns, got {}",
                self.input_name, FEATURE_COUNT, cols
            )));
        }

        let flat: Vec<f32> = input.iter().copied().collect();
        let tensor = Tensor::from_shape(&[rows, cols], &flat).map_err(runtime)?;
        let plan = self
            .model
            .clone()
            .with_input_fact(0, f32::fact([rows, FEATURE_COUNT]).into())
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(runtime)?;
        let outputs = plan.run(tvec!(tensor.into())).map_err(runtime)?;

        let output = outputs
            .first()
            .ok_or_else(|| ModelError::Runtime(format!("no value for output '{}'", self.output_name)))?;
        let view = output.to_array_view::<f32>().map_err(runtime)?;
        Ok(view.iter().copied().collect())
    }
}

fn runtime(e: anyhow::Error) -> ModelError {
    ModelError::Runtime(format!("{e:#}"))
}
