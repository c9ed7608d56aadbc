use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{FeatureVector, MusicRequest, RankedResult, RecommendationResponse},
    services::{
        catalog::CatalogStore,
        encoder::CategoryEncoder,
        predictor::EmbeddingPredictor,
        ranker::{self, ScoredIndex},
        scaler::FeatureScaler,
    },
};

/// Number of recommendations returned per request
pub const DEFAULT_TOP_K: usize = 5;

/// The three trained category vocabularies
#[derive(Debug, Clone)]
pub struct Encoders {
    pub artist: CategoryEncoder,
    pub genre: CategoryEncoder,
    pub subgenre: CategoryEncoder,
}

/// Generates song recommendations from a user-supplied attribute profile
///
/// Holds every trained artifact, read-only once built. A request is encoded,
/// scaled, turned into a query embedding, and ranked against the catalog by
/// cosine similarity.
pub struct RecommendationService {
    encoders: Encoders,
    scaler: FeatureScaler,
    predictor: Box<dyn EmbeddingPredictor>,
    catalog: CatalogStore,
    top_k: usize,
    loaded_at: DateTime<Utc>,
}

impl RecommendationService {
    /// Assembles the service, checking the predictor emits embeddings in the
    /// catalog's space
    pub fn new(
        encoders: Encoders,
        scaler: FeatureScaler,
        predictor: Box<dyn EmbeddingPredictor>,
        catalog: CatalogStore,
    ) -> AppResult<Self> {
        if !catalog.is_empty() && predictor.output_dim() != catalog.dim() {
            return Err(AppError::artifact_load(
                "model",
                format!(
                    "predictor '{}' emits {}-d embeddings but the catalog is {}-d",
                    predictor.name(),
                    predictor.output_dim(),
                    catalog.dim()
                ),
            ));
        }

        Ok(Self {
            encoders,
            scaler,
            predictor,
            catalog,
            top_k: DEFAULT_TOP_K,
            loaded_at: Utc::now(),
        })
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Runs the full pipeline and always produces a structured response
    ///
    /// Unknown labels yield a validation error naming each of them. Any later
    /// failure is reported as a generic error. Both come with no
    /// recommendations.
    pub fn recommend(&self, request: &MusicRequest) -> RecommendationResponse {
        match self.try_recommend(request) {
            Ok(recommendations) => RecommendationResponse::success(recommendations),
            Err(e) => {
                match &e {
                    AppError::UnknownCategory(labels) => {
                        tracing::warn!(unseen = ?labels, "Rejected request with unseen labels");
                    }
                    other => {
                        tracing::error!(error = %other, "Recommendation pipeline failed");
                    }
                }
                RecommendationResponse::failure(&e)
            }
        }
    }

    fn try_recommend(&self, request: &MusicRequest) -> AppResult<Vec<RankedResult>> {
        let features = self.encode(request)?;
        let scaled = self.scaler.scale(&features);
        let query = self.predictor.predict(&scaled)?;

        if query.len() != self.predictor.output_dim() {
            return Err(AppError::Computation(format!(
                "predictor returned {} values, expected {}",
                query.len(),
                self.predictor.output_dim()
            )));
        }

        let top = ranker::rank(&query, self.catalog.embeddings(), self.top_k)?;

        tracing::debug!(
            predictor = self.predictor.name(),
            candidates = self.catalog.len(),
            returned = top.len(),
            "Ranked catalog"
        );

        top.iter().map(|scored| self.decode(scored)).collect()
    }

    /// Validates all three labels before encoding any of them
    fn encode(&self, request: &MusicRequest) -> AppResult<FeatureVector> {
        let fields = [
            (&self.encoders.artist, request.artist.as_str()),
            (&self.encoders.genre, request.genre.as_str()),
            (&self.encoders.subgenre, request.subgenre.as_str()),
        ];

        let mut unseen: Vec<String> = Vec::new();
        for (encoder, label) in fields {
            if !encoder.contains(label) {
                let normalized = CategoryEncoder::normalize(label);
                if !unseen.contains(&normalized) {
                    unseen.push(normalized);
                }
            }
        }
        if !unseen.is_empty() {
            return Err(AppError::UnknownCategory(unseen));
        }

        Ok(FeatureVector {
            artist_code: self.encoders.artist.encode(&request.artist)?,
            popularity: request.popularity as f64,
            genre_code: self.encoders.genre.encode(&request.genre)?,
            subgenre_code: self.encoders.subgenre.encode(&request.subgenre)?,
            energy: request.energy,
            mode: request.mode,
            speechiness: request.speechiness,
            instrumentalness: request.instrumentalness,
        })
    }

    fn decode(&self, scored: &ScoredIndex) -> AppResult<RankedResult> {
        let track = self.catalog.get(scored.index).ok_or_else(|| {
            AppError::Computation(format!("catalog index {} out of range", scored.index))
        })?;

        Ok(RankedResult {
            track_name: track.track_name.clone(),
            track_artist: self.encoders.artist.decode(track.artist_code).to_string(),
            playlist_genre: self.encoders.genre.decode(track.genre_code).to_string(),
            playlist_subgenre: self.encoders.subgenre.decode(track.subgenre_code).to_string(),
            track_popularity: track.popularity,
            similarity: scored.score,
        })
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn encoders(&self) -> &Encoders {
        &self.encoders
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
