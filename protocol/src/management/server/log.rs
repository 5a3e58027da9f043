use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One captured console line.
///
/// `seq` grows by one for every appended line and is never reused, so it
/// stays a valid cursor after older entries have been evicted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(seq: u64, message: impl Into<String>) -> Self {
        Self {
            seq,
            timestamp: Utc::now(),
            message: message.into(),
        }
    }

    /// `[2024-01-01T00:00:00.000Z] message`, the form pushed to dashboards.
    pub fn formatted(&self) -> String {
        format!(
            "[{}] {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.message
        )
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formatted_prefixes_iso_timestamp() {
        let entry = LogEntry {
            seq: 7,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            message: "[Server thread/INFO]: Preparing level \"world\"".into(),
        };
        assert_eq!(
            entry.to_string(),
            "[2024-05-01T12:30:00.000Z] [Server thread/INFO]: Preparing level \"world\""
        );
    }
}
