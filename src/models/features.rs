/// Number of numeric columns the scaler and predictor operate on
pub const FEATURE_COUNT: usize = 8;

/// Column names in the order the model was trained on
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "track_artist",
    "track_popularity",
    "playlist_genre",
    "playlist_subgenre",
    "energy",
    "mode",
    "speechiness",
    "instrumentalness",
];

/// Dense embedding shared by queries and catalog tracks
pub type Embedding = Vec<f32>;

/// Encoded request features, before scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub artist_code: usize,
    pub popularity: f64,
    pub genre_code: usize,
    pub subgenre_code: usize,
    pub energy: f64,
    pub mode: f64,
    pub speechiness: f64,
    pub instrumentalness: f64,
}

impl FeatureVector {
    /// Columns in training order. Category codes are plain numbers here.
    pub fn to_columns(&self) -> [f64; FEATURE_COUNT] {
        [
            self.artist_code as f64,
            self.popularity,
            self.genre_code as f64,
            self.subgenre_code as f64,
            self.energy,
            self.mode,
            self.speechiness,
            self.instrumentalness,
        ]
    }
}

/// Feature vector after per-column normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFeatureVector(pub [f64; FEATURE_COUNT]);

impl ScaledFeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
