use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of the supervised server process.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    #[default]
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Stopped => "stopped",
            ServerStatus::Starting => "starting",
            ServerStatus::Running => "running",
            ServerStatus::Stopping => "stopping",
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self == ServerStatus::Stopped
    }

    pub fn is_running(&self) -> bool {
        *self == ServerStatus::Running
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ServerStatus::Starting).unwrap(),
            "\"starting\""
        );
        let parsed: ServerStatus = serde_json::from_str("\"stopping\"").unwrap();
        assert_eq!(parsed, ServerStatus::Stopping);
        assert_eq!(ServerStatus::default(), ServerStatus::Stopped);
    }
}
