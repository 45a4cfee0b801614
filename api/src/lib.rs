mod core;
mod error_handler;
mod routes;
mod store;

use std::sync::Arc;

use ai_llm_service::{LlmService, config_from_env};
use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

pub use crate::core::{
    app_state::AppState,
    models::topic::{Topic, TopicStatus},
    prompt::build_prompt,
    server_config::ServerConfig,
};
pub use crate::error_handler::{AppError, AppResult};
pub use crate::store::topic_store::TopicStore;

use crate::routes::{
    ask::ask_question_route::ask_question,
    root_route::root,
    topics::{add_topic_route::add_topic, list_topics_route::list_topics},
};

/// Loads config from the environment, builds shared state and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let server = ServerConfig::from_env();

    let llm_cfg = config_from_env().map_err(|e| AppError::Configuration(e.to_string()))?;
    let llm = LlmService::new(llm_cfg).map_err(|e| AppError::Configuration(e.to_string()))?;
    let cfg = llm.config();
    info!(
        provider = %cfg.provider,
        model = %cfg.model,
        credential = cfg.has_api_key(),
        "llm service ready"
    );

    serve(&server, AppState::new(Arc::new(llm))).await
}

/// Binds `server.api_address` and serves `state` with graceful shutdown.
pub async fn serve(server: &ServerConfig, state: AppState) -> AppResult<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&server.api_address)
        .await
        .map_err(|source| AppError::Bind {
            addr: server.api_address.clone(),
            source,
        })?;

    info!(addr = %server.api_address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// All routes plus the CORS layer, over the given state.
pub fn build_router(state: AppState) -> Router {
    // The browser client is served from a different origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/ask", post(ask_question))
        .route("/topics", get(list_topics).post(add_topic))
        .layer(cors)
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal; shutting down");
    }
}
