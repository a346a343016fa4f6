use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::error::ModelError;
use crate::features::FEATURE_COUNT;

/// A loaded model that maps an `N x 8` feature batch to a flat,
/// row-major output buffer.
pub trait InferenceSession: Send + Sync {
    fn input_name(&self) -> &str;
    fn output_name(&self) -> &str;
    fn run(&self, input: Array2<f32>) -> Result<Vec<f32>, ModelError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Sigmoid,
    Linear,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DenseArtifact {
    #[serde(default = "default_input_name")]
    input_name: String,
    #[serde(default = "default_output_name")]
    output_name: String,
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    #[serde(default)]
    activation: Activation,
}

fn default_input_name() -> String {
    "features".to_string()
}

fn default_output_name() -> String {
    "rush".to_string()
}

/// Single dense layer read from a JSON artifact
#[derive(Debug, Clone)]
pub struct DenseSession {
    input_name: String,
    output_name: String,
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl DenseSession {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: DenseArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: DenseArtifact) -> Result<Self, ModelError> {
        let outputs = artifact.bias.len();
        if outputs == 0 {
            return Err(ModelError::Shape("bias must not be empty".to_string()));
        }
        if artifact.weights.len() != FEATURE_COUNT {
            return Err(ModelError::Shape(format!(
                "expected {} weight rows, got {}",
                FEATURE_COUNT,
                artifact.weights.len()
            )));
        }
        if let Some(row) = artifact.weights.iter().find(|row| row.len() != outputs) {
            return Err(ModelError::Shape(format!(
                "weight row has {} columns, bias has {}",
                row.len(),
                outputs
            )));
        }

        let flat: Vec<f32> = artifact.weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((FEATURE_COUNT, outputs), flat)
            .map_err(|e| ModelError::Shape(e.to_string()))?;

        Ok(Self {
            input_name: artifact.input_name,
            output_name: artifact.output_name,
            weights,
            bias: Array1::from(artifact.bias),
            activation: artifact.activation,
        })
    }
}

impl InferenceSession for DenseSession {
    fn input_name(&self) -> &str {
        &self.input_name
    }

    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn run(&self, input: Array2<f32>) -> Result<Vec<f32>, ModelError> {
        if input.ncols() != FEATURE_COUNT {
            return Err(ModelError::Shape(format!(
                "input '{}' expects {} columns, got {}",
                self.input_name,
                FEATURE_COUNT,
                input.ncols()
            )));
        }

        let logits = input.dot(&self.weights) + &self.bias;
        let activated = match self.activation {
            Activation::Sigmoid => logits.mapv(|x| 1.0 / (1.0 + (-x).exp())),
            Activation::Linear => logits,
        };
        Ok(activated.iter().copied().collect())
    }
}
