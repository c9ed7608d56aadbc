use crate::{
    error::{AppError, AppResult},
    models::{artifact::DatasetArtifact, CatalogTrack},
};

/// Immutable in-memory table of catalog tracks
///
/// All embeddings share one dimension, checked when the catalog is built.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    tracks: Vec<CatalogTrack>,
    dim: usize,
}

impl CatalogStore {
    /// Builds the catalog, rejecting embeddings that disagree on dimension
    /// or hold non-finite values
    pub fn new(tracks: Vec<CatalogTrack>) -> AppResult<Self> {
        let dim = tracks.first().map(|t| t.embedding.len()).unwrap_or(0);

        for (index, track) in tracks.iter().enumerate() {
            if track.embedding.len() != dim {
                return Err(AppError::artifact_load(
                    "catalog",
                    format!(
                        "track {} ('{}') has embedding dimension {}, expected {}",
                        index,
                        track.track_name,
                        track.embedding.len(),
                        dim
                    ),
                ));
            }
            if track.embedding.iter().any(|v| !v.is_finite()) {
                return Err(AppError::artifact_load(
                    "catalog",
                    format!("track {} ('{}') has a non-finite embedding", index, track.track_name),
                ));
            }
        }

        Ok(Self { tracks, dim })
    }

    /// Builds the catalog from the dataset artifact
    ///
    /// Records without a `track_name` take their name from the paired
    /// song-name list at the same position.
    pub fn from_artifact(dataset: DatasetArtifact, song_names: &[String]) -> AppResult<Self> {
        let tracks = dataset
            .tracks
            .into_iter()
            .enumerate()
            .map(|(index, record)| -> AppResult<CatalogTrack> {
                let track_name = match record.track_name {
                    Some(name) => name,
                    None => song_names.get(index).cloned().ok_or_else(|| {
                        AppError::artifact_load(
                            "catalog",
                            format!("track {} has no name and no fallback song name", index),
                        )
                    })?,
                };

                Ok(CatalogTrack {
                    track_name,
                    artist_code: record.track_artist,
                    genre_code: record.playlist_genre,
                    subgenre_code: record.playlist_subgenre,
                    popularity: record.track_popularity,
                    embedding: record.lyrics_embedding,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Self::new(tracks)
    }

    pub fn all(&self) -> &[CatalogTrack] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&CatalogTrack> {
        self.tracks.get(index)
    }

    /// Embeddings in catalog order
    pub fn embeddings(&self) -> impl Iterator<Item = &[f32]> {
        self.tracks.iter().map(|t| t.embedding.as_slice())
    }

    /// Embedding dimension, 0 for an empty catalog
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
