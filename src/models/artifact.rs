use serde::Deserialize;

// ============================================================================
// Trained artifact documents, as written by the training pipeline
// ============================================================================

/// `*_encoder.json`: label vocabulary, code is the position in `classes`
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderArtifact {
    pub classes: Vec<String>,
}

/// `scaler.json`: per-column statistics of a standard scaler
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Activation applied between hidden layers of the predictor
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Identity,
    Relu,
}

/// One dense layer: `weights` is `[output][input]`
#[derive(Debug, Clone, Deserialize)]
pub struct DenseLayerArtifact {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// `model.json`: feed-forward regressor mapping scaled features to an embedding
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub activation: Activation,
    pub layers: Vec<DenseLayerArtifact>,
}

/// A row of `songs_dataset.json`
#[derive(Debug, Clone, Deserialize)]
pub struct TrackRecord {
    #[serde(default)]
    pub track_name: Option<String>,
    pub track_artist: i64,
    pub playlist_genre: i64,
    pub playlist_subgenre: i64,
    pub track_popularity: i64,
    pub lyrics_embedding: Vec<f32>,
}

/// `songs_dataset.json`
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetArtifact {
    pub tracks: Vec<TrackRecord>,
}
