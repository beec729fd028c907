use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobscout_api::assistant::LlmIntentRouter;
use jobscout_api::config::Config;
use jobscout_api::llm_client::{self, LlmClient};
use jobscout_api::matching::scorer::LlmMatchScorer;
use jobscout_api::routes::build_router;
use jobscout_api::source::AdzunaClient;
use jobscout_api::state::AppState;
use jobscout_api::store::JsonStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("jobscout_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobScout API v{}", env!("CARGO_PKG_VERSION"));

    // Persistence: single JSON document, lives wherever DATA_PATH points
    let store = Arc::new(JsonStore::new(config.data_path.clone()));
    info!("Store at {}", config.data_path.display());

    // Job source collaborator
    let job_source = Arc::new(AdzunaClient::new(
        config.adzuna_app_id.clone(),
        config.adzuna_app_key.clone(),
    ));

    // LLM client shared by the scorer and the assistant router
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let scorer = Arc::new(LlmMatchScorer::new(llm.clone()));
    let assistant = Arc::new(LlmIntentRouter::new(llm));

    // Build app state
    let state = AppState {
        job_source,
        scorer,
        assistant,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
