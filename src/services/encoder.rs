use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::artifact::EncoderArtifact,
};

/// Label returned when decoding a code outside the vocabulary
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Bidirectional mapping between trained labels and dense integer codes
///
/// Encoding normalizes its input and rejects labels the model never saw.
/// Decoding is only fed codes that come from the catalog, so it falls back
/// to [`UNKNOWN_LABEL`] instead of failing.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    field: &'static str,
    labels: Vec<String>,
    codes: HashMap<String, usize>,
}

impl CategoryEncoder {
    /// Builds an encoder from the trained label order
    pub fn new(field: &'static str, labels: Vec<String>) -> AppResult<Self> {
        let mut codes = HashMap::with_capacity(labels.len());
        for (code, label) in labels.iter().enumerate() {
            if codes.insert(label.clone(), code).is_some() {
                return Err(AppError::artifact_load(
                    field,
                    format!("duplicate label '{}' in vocabulary", label),
                ));
            }
        }

        Ok(Self {
            field,
            labels,
            codes,
        })
    }

    pub fn from_artifact(field: &'static str, artifact: EncoderArtifact) -> AppResult<Self> {
        Self::new(field, artifact.classes)
    }

    /// Lowercases and trims a raw label the same way training did
    pub fn normalize(label: &str) -> String {
        label.trim().to_lowercase()
    }

    /// Encodes a raw label, failing if it is not in the vocabulary
    pub fn encode(&self, label: &str) -> AppResult<usize> {
        let normalized = Self::normalize(label);
        self.codes
            .get(&normalized)
            .copied()
            .ok_or(AppError::UnknownCategory(vec![normalized]))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.codes.contains_key(&Self::normalize(label))
    }

    /// Decodes a code back to its label, or `"Unknown"` when out of range
    pub fn decode(&self, code: i64) -> &str {
        usize::try_from(code)
            .ok()
            .and_then(|index| self.labels.get(index))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
