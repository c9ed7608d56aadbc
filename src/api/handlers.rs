use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{MusicRequest, RecommendationResponse};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog_size: usize,
    pub embedding_dim: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.recommender.catalog();
    Json(HealthResponse {
        status: "healthy",
        catalog_size: catalog.len(),
        embedding_dim: catalog.dim(),
        loaded_at: state.recommender.loaded_at(),
    })
}

/// Recommend catalog tracks for a song attribute profile
///
/// Always answers 200: validation and computation failures are reported in
/// the `error` field of the body.
pub async fn predict(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<MusicRequest>,
) -> Json<RecommendationResponse> {
    tracing::info!(
        request_id = %request_id,
        artist = %request.artist,
        genre = %request.genre,
        subgenre = %request.subgenre,
        "Processing recommendation request"
    );

    let recommender = state.recommender.clone();
    let response = tokio::task::spawn_blocking(move || recommender.recommend(&request))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Recommendation task failed");
            RecommendationResponse::failure(&AppError::Internal(e.to_string()))
        });

    tracing::info!(
        request_id = %request_id,
        returned = response.recommendations.len(),
        failed = response.error.is_some(),
        "Recommendation completed"
    );

    Json(response)
}

/// Serves the artist list used by the client for autocomplete
pub async fn artist_list(State(state): State<AppState>) -> AppResult<Response> {
    match tokio::fs::read(&state.artist_list_path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let name = state
                .artist_list_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| state.artist_list_path.display().to_string());
            Err(AppError::NotFound(format!("{} not found", name)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Serves the web client, or a placeholder when it is not deployed
pub async fn root(State(state): State<AppState>) -> Response {
    let index = state.client_dir.join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => Json(json!({ "Hello": "World" })).into_response(),
    }
}
