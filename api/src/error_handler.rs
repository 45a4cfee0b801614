use ai_llm_service::{AiLlmError, error_chain};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Request ---
    /// Caller sent an unusable request (empty question, malformed JSON).
    #[error("{0}")]
    Validation(String),

    // --- Config ---
    /// The server is missing something it needs (e.g. the provider credential).
    #[error("{0}")]
    Configuration(String),

    // --- Upstream ---
    /// The AI provider or the network to it failed.
    #[error("{0}")]
    Upstream(String),

    // --- Boot / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 5xx
            AppError::Configuration(_) | AppError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Bind { .. } | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIG_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(%status, code, %detail, "request failed");
        } else {
            warn!(%status, code, %detail, "request rejected");
        }

        (status, Json(ErrorBody { error: code, detail })).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed or mistyped JSON bodies are validation failures.
impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Validation(err.body_text())
    }
}

/// Configuration problems stay configuration problems; everything else is upstream.
///
/// Vendor and network failures carry `"<Provider> API error: <reason>"`.
impl From<AiLlmError> for AppError {
    fn from(err: AiLlmError) -> Self {
        match err {
            AiLlmError::Config(e) => AppError::Configuration(e.to_string()),
            AiLlmError::Provider(e) => {
                AppError::Upstream(format!("{} API error: {}", e.provider, e.kind))
            }
            AiLlmError::HttpTransport(e) => {
                AppError::Upstream(format!("AI provider error: {}", error_chain(&e)))
            }
            other => AppError::Upstream(format!("AI provider error: {other}")),
        }
    }
}
