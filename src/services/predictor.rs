//! Embedding prediction from scaled request features
//!
//! The trained regressor is treated as an opaque scoring function: the
//! service only invokes it. Implementations must be deterministic and must
//! emit embeddings of the same dimension as the catalog.

use crate::{
    error::{AppError, AppResult},
    models::{
        artifact::{Activation, ModelArtifact},
        Embedding, ScaledFeatureVector, FEATURE_COUNT,
    },
};

/// Trait for embedding predictors
#[cfg_attr(test, mockall::automock)]
pub trait EmbeddingPredictor: Send + Sync {
    /// Maps a scaled feature vector to a query embedding
    fn predict(&self, features: &ScaledFeatureVector) -> AppResult<Embedding>;

    /// Dimension of every embedding this predictor emits
    fn output_dim(&self) -> usize;

    /// Predictor name for logging and debugging
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl DenseLayer {
    fn output_dim(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(self.bias.iter())
            .map(|(row, bias)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + bias)
            .collect()
    }
}

/// Feed-forward regressor: dense layers with a hidden activation and a
/// linear output. A single layer is plain multi-output linear regression.
#[derive(Debug, Clone)]
pub struct FeedForwardPredictor {
    activation: Activation,
    layers: Vec<DenseLayer>,
}

impl FeedForwardPredictor {
    /// Validates layer shapes and builds the predictor
    pub fn from_artifact(artifact: ModelArtifact) -> AppResult<Self> {
        if artifact.layers.is_empty() {
            return Err(AppError::artifact_load("model", "model has no layers"));
        }

        let mut expected_input = FEATURE_COUNT;
        let mut layers = Vec::with_capacity(artifact.layers.len());

        for (i, layer) in artifact.layers.into_iter().enumerate() {
            if layer.weights.len() != layer.bias.len() {
                return Err(AppError::artifact_load(
                    "model",
                    format!(
                        "layer {} has {} weight rows but {} biases",
                        i,
                        layer.weights.len(),
                        layer.bias.len()
                    ),
                ));
            }
            if layer.bias.is_empty() {
                return Err(AppError::artifact_load(
                    "model",
                    format!("layer {} has no outputs", i),
                ));
            }
            if let Some(row) = layer.weights.iter().find(|row| row.len() != expected_input) {
                return Err(AppError::artifact_load(
                    "model",
                    format!(
                        "layer {} expects {} inputs, found a row of {}",
                        i,
                        expected_input,
                        row.len()
                    ),
                ));
            }

            let dense = DenseLayer {
                weights: layer.weights,
                bias: layer.bias,
            };
            expected_input = dense.output_dim();
            layers.push(dense);
        }

        Ok(Self {
            activation: artifact.activation,
            layers,
        })
    }

    fn activate(&self, values: &mut [f32]) {
        match self.activation {
            Activation::Identity => {}
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
        }
    }
}

impl EmbeddingPredictor for FeedForwardPredictor {
    fn predict(&self, features: &ScaledFeatureVector) -> AppResult<Embedding> {
        let mut values: Vec<f32> = features.as_slice().iter().map(|&x| x as f32).collect();

        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            values = layer.forward(&values);
            if i < last {
                self.activate(&mut values);
            }
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(AppError::Computation(
                "predicted embedding contains non-finite values".to_string(),
            ));
        }

        Ok(values)
    }

    fn output_dim(&self) -> usize {
        self.layers.last().map(DenseLayer::output_dim).unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        match self.activation {
            Activation::Identity => "feed-forward(identity)",
            Activation::Relu => "feed-forward(relu)",
        }
    }
}
