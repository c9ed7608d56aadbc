use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::artifact::{DatasetArtifact, EncoderArtifact, ModelArtifact, ScalerArtifact},
    services::{
        catalog::CatalogStore,
        encoder::CategoryEncoder,
        predictor::{EmbeddingPredictor, FeedForwardPredictor},
        recommendations::{Encoders, RecommendationService},
        scaler::FeatureScaler,
    },
};

/// Locations of every trained artifact inside a model directory
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub artist_encoder: PathBuf,
    pub genre_encoder: PathBuf,
    pub subgenre_encoder: PathBuf,
    pub song_names: PathBuf,
    pub dataset: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names under `model_dir`
    pub fn in_dir(model_dir: &Path) -> Self {
        Self {
            model: model_dir.join("model.json"),
            scaler: model_dir.join("scaler.json"),
            artist_encoder: model_dir.join("artist_encoder.json"),
            genre_encoder: model_dir.join("genre_encoder.json"),
            subgenre_encoder: model_dir.join("subgenre_encoder.json"),
            song_names: model_dir.join("song_names.json"),
            dataset: model_dir.join("songs_dataset.json"),
        }
    }
}

/// Reads and deserializes one JSON artifact
fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let file = File::open(path).map_err(|e| AppError::artifact_load(path.display(), e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::artifact_load(path.display(), e))
}

/// Re-attributes a validation failure to the file it came from
fn at_path(path: &Path) -> impl FnOnce(AppError) -> AppError + '_ {
    move |e| match e {
        AppError::ArtifactLoad { reason, .. } => AppError::artifact_load(path.display(), reason),
        other => other,
    }
}

fn load_encoder(field: &'static str, path: &Path) -> AppResult<CategoryEncoder> {
    let artifact: EncoderArtifact = read_json(path)?;
    let encoder = CategoryEncoder::from_artifact(field, artifact).map_err(at_path(path))?;
    tracing::debug!(field = encoder.field(), labels = encoder.len(), "Loaded category encoder");
    Ok(encoder)
}

/// Loads every artifact and assembles the recommendation service
///
/// Any missing or malformed artifact fails the whole load, so the service
/// never runs on a partial artifact set.
pub fn load_recommender(paths: &ArtifactPaths) -> AppResult<RecommendationService> {
    let encoders = Encoders {
        artist: load_encoder("track_artist", &paths.artist_encoder)?,
        genre: load_encoder("playlist_genre", &paths.genre_encoder)?,
        subgenre: load_encoder("playlist_subgenre", &paths.subgenre_encoder)?,
    };

    let scaler_artifact: ScalerArtifact = read_json(&paths.scaler)?;
    let scaler = FeatureScaler::from_artifact(&scaler_artifact).map_err(at_path(&paths.scaler))?;

    let model_artifact: ModelArtifact = read_json(&paths.model)?;
    let predictor =
        FeedForwardPredictor::from_artifact(model_artifact).map_err(at_path(&paths.model))?;

    let song_names: Vec<String> = read_json(&paths.song_names)?;
    let dataset: DatasetArtifact = read_json(&paths.dataset)?;
    let catalog =
        CatalogStore::from_artifact(dataset, &song_names).map_err(at_path(&paths.dataset))?;

    tracing::info!(
        artists = encoders.artist.len(),
        genres = encoders.genre.len(),
        subgenres = encoders.subgenre.len(),
        tracks = catalog.len(),
        embedding_dim = catalog.dim(),
        predictor = predictor.name(),
        "Artifacts loaded"
    );

    RecommendationService::new(encoders, scaler, Box::new(predictor), catalog)
}
