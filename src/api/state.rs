use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::services::RecommendationService;

/// Shared application state
///
/// Everything here is read-only after startup, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RecommendationService>,
    pub client_dir: PathBuf,
    pub artist_list_path: PathBuf,
}

impl AppState {
    /// Creates the state around an already loaded recommender
    pub fn new(recommender: RecommendationService, config: &Config) -> Self {
        Self {
            recommender: Arc::new(recommender),
            client_dir: config.client_dir.clone(),
            artist_list_path: config.artist_list_path.clone(),
        }
    }
}
