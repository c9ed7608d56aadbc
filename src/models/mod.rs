use serde::{de, Deserialize, Deserializer, Serialize};

pub mod artifact;
pub mod features;
pub mod track;

pub use features::{Embedding, FeatureVector, ScaledFeatureVector, FEATURE_COLUMNS, FEATURE_COUNT};
pub use track::{CatalogTrack, RankedResult};

use crate::error::AppError;

/// Song attribute profile submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MusicRequest {
    pub artist: String,
    #[serde(default = "default_popularity", deserialize_with = "integral_number")]
    pub popularity: i64,
    pub genre: String,
    pub subgenre: String,
    #[serde(default = "default_unit")]
    pub energy: f64,
    #[serde(default = "default_unit")]
    pub mode: f64,
    #[serde(default = "default_unit")]
    pub speechiness: f64,
    #[serde(default = "default_unit")]
    pub instrumentalness: f64,
}

fn default_popularity() -> i64 {
    50
}

fn default_unit() -> f64 {
    0.5
}

/// Accepts an integer, or a float with no fractional part such as `70.0`
fn integral_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    match Number::deserialize(deserializer)? {
        Number::Int(n) => Ok(n),
        Number::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Ok(f as i64)
        }
        Number::Float(f) => Err(de::Error::custom(format!(
            "invalid popularity {f}: expected an integer"
        ))),
    }
}

/// Outcome of a recommendation request. `error` is null on success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub error: Option<String>,
    pub recommendations: Vec<RankedResult>,
}

impl RecommendationResponse {
    pub fn success(recommendations: Vec<RankedResult>) -> Self {
        Self {
            error: None,
            recommendations,
        }
    }

    /// Converts a pipeline failure into the structured response shape
    pub fn failure(error: &AppError) -> Self {
        let message = match error {
            AppError::UnknownCategory(_) => error.to_string(),
            other => format!("An error occurred: {}", other),
        };

        Self {
            error: Some(message),
            recommendations: Vec::new(),
        }
    }
}
