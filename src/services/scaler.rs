use crate::{
    error::{AppError, AppResult},
    models::{
        artifact::ScalerArtifact, FeatureVector, ScaledFeatureVector, FEATURE_COLUMNS, FEATURE_COUNT,
    },
};

/// Trained standard scaler over the feature columns
///
/// Every column is normalized, including the encoded category codes, because
/// that is how the model was trained.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl FeatureScaler {
    /// Builds a scaler from trained column statistics
    ///
    /// Fails if either column list does not have exactly [`FEATURE_COUNT`]
    /// entries, or if any statistic is unusable.
    pub fn new(mean: &[f64], scale: &[f64]) -> AppResult<Self> {
        let mean: [f64; FEATURE_COUNT] = mean.try_into().map_err(|_| {
            AppError::artifact_load(
                "scaler",
                format!("expected {} mean columns, got {}", FEATURE_COUNT, mean.len()),
            )
        })?;
        let scale: [f64; FEATURE_COUNT] = scale.try_into().map_err(|_| {
            AppError::artifact_load(
                "scaler",
                format!("expected {} scale columns, got {}", FEATURE_COUNT, scale.len()),
            )
        })?;

        if let Some(column) = mean.iter().position(|m| !m.is_finite()) {
            return Err(AppError::artifact_load(
                "scaler",
                format!("non-finite mean for {}", FEATURE_COLUMNS[column]),
            ));
        }
        if let Some(column) = scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(AppError::artifact_load(
                "scaler",
                format!("unusable scale {} for {}", scale[column], FEATURE_COLUMNS[column]),
            ));
        }

        Ok(Self { mean, scale })
    }

    pub fn from_artifact(artifact: &ScalerArtifact) -> AppResult<Self> {
        Self::new(&artifact.mean, &artifact.scale)
    }

    /// Applies `(x - mean) / scale` to each column
    pub fn scale(&self, features: &FeatureVector) -> ScaledFeatureVector {
        let mut columns = features.to_columns();
        for (i, value) in columns.iter_mut().enumerate() {
            *value = (*value - self.mean[i]) / self.scale[i];
        }
        ScaledFeatureVector(columns)
    }
}
