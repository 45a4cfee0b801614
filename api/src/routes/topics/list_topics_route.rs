use axum::{Json, extract::State};
use tracing::debug;

use crate::core::{app_state::AppState, models::topic::Topic};

/// Handler: GET /topics
///
/// Returns every stored topic in insertion order.
pub async fn list_topics(State(state): State<AppState>) -> Json<Vec<Topic>> {
    let topics = state.topics.list().await;
    debug!(count = topics.len(), "list_topics");
    Json(topics)
}
