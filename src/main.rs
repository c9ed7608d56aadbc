use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use songsim_api::api::{create_router, AppState};
use songsim_api::artifacts::{load_recommender, ArtifactPaths};
use songsim_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Load trained artifacts once; every request shares them read-only
    let paths = ArtifactPaths::in_dir(&config.model_dir);
    let recommender = load_recommender(&paths)
        .with_context(|| format!("Failed to load artifacts from {}", config.model_dir.display()))?
        .with_top_k(config.top_k);

    let state = AppState::new(recommender, &config);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
