use serde::{Deserialize, Serialize};

use crate::core::models::topic::Topic;

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question. A missing field reads as empty and is
    /// rejected by the handler with a descriptive message.
    #[serde(default)]
    pub question: String,
    /// Optional topics used only to build the prompt context.
    #[serde(default)]
    pub topics: Option<Vec<Topic>>,
}

/// Response payload for /ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Final model answer (plain text).
    pub answer: String,
}
