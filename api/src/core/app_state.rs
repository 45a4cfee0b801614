use std::sync::Arc;

use ai_llm_service::TextGenerator;

use crate::store::topic_store::TopicStore;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend used by `/ask`.
    pub llm: Arc<dyn TextGenerator>,
    /// In-memory topic list behind `/topics`.
    pub topics: TopicStore,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            llm,
            topics: TopicStore::new(),
        }
    }
}
