use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Handler: GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello, this is the root endpoint!",
    })
}
