use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use songsim_api::api::{create_router, AppState};
use songsim_api::artifacts::{load_recommender, ArtifactPaths};
use songsim_api::config::Config;
use songsim_api::models::artifact::{ModelArtifact, ScalerArtifact};
use songsim_api::models::{CatalogTrack, RecommendationResponse};
use songsim_api::services::{
    CatalogStore, Encoders, FeatureScaler, FeedForwardPredictor,
    RecommendationService,
};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn test_config() -> Config {
    Config {
        model_dir: fixtures().join("model"),
        client_dir: fixtures().join("client"),
        artist_list_path: fixtures().join("artist.json"),
        ..Config::default()
    }
}

fn create_test_server_with(config: &Config) -> TestServer {
    let recommender = load_recommender(&ArtifactPaths::in_dir(&config.model_dir))
        .expect("fixture artifacts load");
    let state = AppState::new(recommender, config);
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(&test_config())
}

fn drake_request() -> Value {
    json!({
        "artist": "drake",
        "genre": "pop",
        "subgenre": "dance pop",
        "popularity": 70,
        "energy": 0.8,
        "mode": 1.0,
        "speechiness": 0.1,
        "instrumentalness": 0.0
    })
}

/// Two-track catalog built in memory, same 4-d space as the fixtures
fn small_catalog_recommender() -> RecommendationService {
    let paths = ArtifactPaths::in_dir(&fixtures().join("model"));
    let full = load_recommender(&paths).unwrap();
    let encoders: Encoders = full.encoders().clone();

    let model: ModelArtifact =
        serde_json::from_str(&std::fs::read_to_string(&paths.model).unwrap()).unwrap();
    let scaler: ScalerArtifact =
        serde_json::from_str(&std::fs::read_to_string(&paths.scaler).unwrap()).unwrap();

    let tracks: Vec<CatalogTrack> = full.catalog().all()[..2].to_vec();

    RecommendationService::new(
        encoders,
        FeatureScaler::from_artifact(&scaler).unwrap(),
        Box::new(FeedForwardPredictor::from_artifact(model).unwrap()),
        CatalogStore::new(tracks).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["catalog_size"], 7);
    assert_eq!(body["embedding_dim"], 4);
}

#[tokio::test]
async fn test_predict_returns_five_sorted_recommendations() {
    let server = create_test_server();

    let response = server.post("/predict/").json(&drake_request()).await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(body.error, None);
    assert_eq!(body.recommendations.len(), 5);

    for pair in body.recommendations.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    for result in &body.recommendations {
        assert!((-1.0..=1.0).contains(&result.similarity));
    }
}

#[tokio::test]
async fn test_predict_response_shape() {
    let server = create_test_server();

    let response = server.post("/predict/").json(&drake_request()).await;
    let body: Value = response.json();

    assert!(body["error"].is_null());
    let first = &body["recommendations"][0];
    for field in [
        "track_name",
        "track_artist",
        "playlist_genre",
        "playlist_subgenre",
        "track_popularity",
        "similarity",
    ] {
        assert!(first.get(field).is_some(), "missing field {field}");
    }
}

#[tokio::test]
async fn test_predict_normalizes_labels() {
    let server = create_test_server();

    let canonical: Value = server.post("/predict/").json(&drake_request()).await.json();

    let mut shouting = drake_request();
    shouting["artist"] = json!("  DRAKE ");
    shouting["genre"] = json!("Pop");
    shouting["subgenre"] = json!(" Dance Pop");
    let normalized: Value = server.post("/predict/").json(&shouting).await.json();

    assert_eq!(canonical, normalized);
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let server = create_test_server();

    let first: Value = server.post("/predict").json(&drake_request()).await.json();
    let second: Value = server.post("/predict").json(&drake_request()).await.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_predict_uses_defaults() {
    let server = create_test_server();

    let response = server
        .post("/predict/")
        .json(&json!({
            "artist": "rihanna",
            "genre": "r&b",
            "subgenre": "neo soul"
        }))
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(body.error, None);
    assert_eq!(body.recommendations.len(), 5);
}

#[tokio::test]
async fn test_predict_unknown_artist() {
    let server = create_test_server();

    let mut request = drake_request();
    request["artist"] = json!("zzz_not_a_real_artist");

    // Domain failures still answer 200 with a structured error
    let response = server.post("/predict/").json(&request).await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert!(body.error.unwrap().contains("zzz_not_a_real_artist"));
    assert!(body.recommendations.is_empty());
}

#[tokio::test]
async fn test_predict_reports_every_unseen_label() {
    let server = create_test_server();

    let response = server
        .post("/predict/")
        .json(&json!({
            "artist": "nobody",
            "genre": "polka",
            "subgenre": "polka"
        }))
        .await;

    let body: RecommendationResponse = response.json();
    let error = body.error.unwrap();
    assert!(error.contains("nobody"));
    assert_eq!(error.matches("polka").count(), 1);
    assert!(body.recommendations.is_empty());
}

#[tokio::test]
async fn test_predict_missing_required_field_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/predict/")
        .json(&json!({ "genre": "pop", "subgenre": "dance pop" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_predict_accepts_integral_float_popularity() {
    let server = create_test_server();

    let canonical: Value = server.post("/predict/").json(&drake_request()).await.json();

    let mut request = drake_request();
    request["popularity"] = json!(70.0);
    let response = server.post("/predict/").json(&request).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, canonical);
}

#[tokio::test]
async fn test_predict_extreme_energy_keeps_ranking() {
    let server = create_test_server();

    let mut request = drake_request();
    request["energy"] = json!(1e25);
    let body: RecommendationResponse = server.post("/predict/").json(&request).await.json();

    assert_eq!(body.error, None);
    assert_eq!(body.recommendations.len(), 5);
    assert!(body
        .recommendations
        .iter()
        .any(|r| r.similarity.abs() > 1e-3));
    for pair in body.recommendations.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[tokio::test]
async fn test_predict_small_catalog() {
    let config = test_config();
    let state = AppState::new(small_catalog_recommender(), &config);
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server.post("/predict/").json(&drake_request()).await;
    let body: RecommendationResponse = response.json();

    assert_eq!(body.error, None);
    assert_eq!(body.recommendations.len(), 2);
}

#[tokio::test]
async fn test_artist_list_served() {
    let server = create_test_server();

    let response = server.get("/artist.json").await;
    response.assert_status_ok();

    let artists: Vec<String> = response.json();
    assert!(artists.contains(&"Drake".to_string()));
}

#[tokio::test]
async fn test_artist_list_missing() {
    let config = Config {
        artist_list_path: fixtures().join("does-not-exist/artist.json"),
        ..test_config()
    };
    let server = create_test_server_with(&config);

    let response = server.get("/artist.json").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "artist.json not found");
}

#[tokio::test]
async fn test_root_serves_client() {
    let server = create_test_server();

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("recommendationForm"));
}

#[tokio::test]
async fn test_root_without_client() {
    let config = Config {
        client_dir: fixtures().join("no-client"),
        ..test_config()
    };
    let server = create_test_server_with(&config);

    let response = server.get("/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "Hello": "World" }));
}

#[tokio::test]
async fn test_client_directory_served() {
    let server = create_test_server();

    let response = server.get("/client/index.html").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server();

    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
