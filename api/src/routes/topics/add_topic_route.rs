use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::info;

use crate::{
    core::{app_state::AppState, models::topic::Topic},
    error_handler::AppResult,
};

/// Handler: POST /topics
///
/// Appends the topic as-is (no id uniqueness check) and echoes it back.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/topics \
///   -H 'content-type: application/json' \
///   -d '{"id":1718000000000,"title":"Rust","description":"ownership","status":"Not started"}'
/// ```
pub async fn add_topic(
    State(state): State<AppState>,
    payload: Result<Json<Topic>, JsonRejection>,
) -> AppResult<Json<Topic>> {
    let Json(topic) = payload?;
    let stored = state.topics.append(topic).await;
    info!(id = stored.id, title = %stored.title, status = %stored.status, "topic added");
    Ok(Json(stored))
}
