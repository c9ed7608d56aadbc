use serde::{Deserialize, Serialize};

use super::Embedding;

/// A catalog track with its encoded categories and precomputed embedding
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTrack {
    pub track_name: String,
    pub artist_code: i64,
    pub genre_code: i64,
    pub subgenre_code: i64,
    pub popularity: i64,
    pub embedding: Embedding,
}

/// A decoded catalog track together with its similarity to the query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedResult {
    pub track_name: String,
    pub track_artist: String,
    pub playlist_genre: String,
    pub playlist_subgenre: String,
    pub track_popularity: i64,
    pub similarity: f32,
}
