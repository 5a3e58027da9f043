use crate::management::server::{LogEntry, ServerStatus};
use serde::{Deserialize, Serialize};

/// Frames pushed to dashboards over the WebSocket channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Log { message: String },
    Status { status: ServerStatus },
}

impl From<&LogEntry> for Event {
    fn from(entry: &LogEntry) -> Self {
        Event::Log {
            message: entry.formatted(),
        }
    }
}

impl From<ServerStatus> for Event {
    fn from(status: ServerStatus) -> Self {
        Event::Status { status }
    }
}
