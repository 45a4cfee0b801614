use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, prompt::build_prompt},
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask
///
/// Answers a question, optionally in the context of the user's topics.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"How should I study lifetimes?","topics":[{"id":1,"title":"Rust","description":"ownership","status":"In Progress"}]}'
/// ```
#[instrument(skip_all)]
pub async fn ask_question(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    let Json(body) = payload?;

    if body.question.trim().is_empty() {
        return Err(AppError::Validation(
            "field `question` is required and must be a non-empty string".into(),
        ));
    }

    let topics = body.topics.unwrap_or_default();
    let prompt = build_prompt(&body.question, &topics);
    debug!(
        topics = topics.len(),
        prompt_len = prompt.len(),
        "ask: prompt assembled"
    );

    let answer = state.llm.generate(&prompt).await?;

    info!(answer_len = answer.len(), "ask: answered");
    Ok(Json(AskResponse { answer }))
}
