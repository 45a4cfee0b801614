use std::fmt;

use serde::{Deserialize, Serialize};

/// A user-tracked learning item.
///
/// `id` is caller-assigned (the web client uses a millisecond timestamp) and
/// is not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TopicStatus,
}

/// Progress of a [`Topic`].
///
/// The three canonical values serialize to `"Not started"`, `"In Progress"`
/// and `"Completed"`. Anything else is kept verbatim in [`TopicStatus::Other`]
/// so topic creation never rejects a record over its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TopicStatus {
    NotStarted,
    InProgress,
    Completed,
    Other(String),
}

impl TopicStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TopicStatus::NotStarted => "Not started",
            TopicStatus::InProgress => "In Progress",
            TopicStatus::Completed => "Completed",
            TopicStatus::Other(s) => s,
        }
    }
}

impl From<String> for TopicStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Not started" => TopicStatus::NotStarted,
            "In Progress" => TopicStatus::InProgress,
            "Completed" => TopicStatus::Completed,
            _ => TopicStatus::Other(s),
        }
    }
}

impl From<TopicStatus> for String {
    fn from(status: TopicStatus) -> Self {
        match status {
            TopicStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
