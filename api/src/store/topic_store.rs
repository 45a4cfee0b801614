//! Process-lifetime topic list.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::core::models::topic::Topic;

/// Shared, ordered, append-only collection of topics.
///
/// Cloning the store clones the handle, not the data. Appends take the write
/// lock, so concurrent requests never interleave mutations of the backing
/// `Vec`; readers get a snapshot.
#[derive(Clone, Default)]
pub struct TopicStore {
    inner: Arc<RwLock<Vec<Topic>>>,
}

impl TopicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `topic` unconditionally and returns the stored record.
    pub async fn append(&self, topic: Topic) -> Topic {
        let mut topics = self.inner.write().await;
        topics.push(topic.clone());
        debug!(id = topic.id, total = topics.len(), "topic appended");
        topic
    }

    /// Snapshot of all topics in insertion order.
    pub async fn list(&self) -> Vec<Topic> {
        self.inner.read().await.clone()
    }
}
