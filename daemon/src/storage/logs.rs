use anyhow::Context;
use paperdash_protocol::api::LogsResult;

use super::ServerFiles;

const LATEST_LOG: &str = "logs/latest.log";

impl ServerFiles {
    /// The last `lines` non-blank lines of `logs/latest.log`.
    pub async fn latest_log(&self, lines: usize) -> anyhow::Result<LogsResult> {
        let path = self.path(LATEST_LOG);
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes);

        let all: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        let total_lines = all.len();
        let logs = all[total_lines.saturating_sub(lines)..]
            .iter()
            .map(|l| l.to_string())
            .collect();

        Ok(LogsResult { logs, total_lines })
    }
}
