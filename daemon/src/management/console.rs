use log::debug;
use paperdash_protocol::management::server::{LogEntry, TpsSample};
use regex::Regex;
use std::time::Duration;
use tokio::time::Instant;

use crate::management::minecraft::{parse_tps, strip_formatting, TPS_PATTERN};
use crate::management::{Supervisor, SupervisorError};

const TPS_TIMEOUT: Duration = Duration::from_millis(3000);

impl Supervisor {
    /// Writes `command` to the server console and echoes it into the log.
    pub fn execute(&self, command: &str) -> Result<LogEntry, SupervisorError> {
        if !self.status().is_running() {
            return Err(SupervisorError::NotRunning);
        }
        self.write_line(command)?;
        debug!("console command: {}", command);
        Ok(self.logs().append(format!("[COMMAND] {}", command)))
    }

    /// Runs `command` and returns the lines the server printed afterwards,
    /// joined by `\n`. Whatever arrives within the first poll that produces
    /// output is the answer.
    pub async fn execute_and_collect(
        &self,
        command: &str,
        timeout: Duration,
    ) -> Result<String, SupervisorError> {
        self.collect(command, timeout, |_| true).await
    }

    /// Like [`Self::execute_and_collect`], but waits for a line matching
    /// `pattern` so that unrelated output does not count as the answer.
    pub async fn execute_and_match(
        &self,
        command: &str,
        pattern: &Regex,
        timeout: Duration,
    ) -> Result<String, SupervisorError> {
        self.collect(command, timeout, |lines| {
            lines
                .iter()
                .any(|line| pattern.is_match(&strip_formatting(line)))
        })
        .await
    }

    pub async fn tps(&self) -> Result<Option<TpsSample>, SupervisorError> {
        let output = self.execute_and_match("tps", &TPS_PATTERN, TPS_TIMEOUT).await?;
        Ok(parse_tps(&output))
    }

    async fn collect<F>(
        &self,
        command: &str,
        timeout: Duration,
        accept: F,
    ) -> Result<String, SupervisorError>
    where
        F: Fn(&[String]) -> bool,
    {
        let echo = self.execute(command)?;
        let deadline = Instant::now() + timeout;
        let poll = self.console_config().poll_interval();

        while Instant::now() < deadline {
            tokio::time::sleep(poll).await;
            let lines: Vec<String> = self
                .logs()
                .entries_after(echo.seq)
                .into_iter()
                .map(|entry| entry.message)
                .collect();
            if !lines.is_empty() && accept(&lines) {
                return Ok(lines.join("\n"));
            }
        }
        Err(SupervisorError::Timeout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::management::testing::*;
    use paperdash_protocol::management::server::ServerStatus;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn execute_requires_running() {
        let dir = tempfile::tempdir().unwrap();
        let supervisor = fake_supervisor(dir.path(), SILENT_SERVER);

        assert!(matches!(
            supervisor.execute("say hi"),
            Err(SupervisorError::NotRunning)
        ));

        supervisor.start().unwrap();
        let before = supervisor.logs().next_seq();
        assert!(matches!(
            supervisor.execute("say hi"),
            Err(SupervisorError::NotRunning)
        ));
        // nothing was echoed, and the script would have answered "got say hi"
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(supervisor.logs().entries_after(before - 1).is_empty());

        supervisor.stop().unwrap();
        wait_for_status(&supervisor, ServerStatus::Stopped).await;
    }

    #[tokio::test]
    async fn execute_echoes_command() {
        let dir = tempfile::tempdir().unwrap();
        let supervisor = running_fake(dir.path()).await;

        let echo = supervisor.execute("list").unwrap();
        assert_eq!(echo.message, "[COMMAND] list");

        supervisor.stop().unwrap();
        wait_for_status(&supervisor, ServerStatus::Stopped).await;
    }

    #[tokio::test]
    async fn collect_returns_new_lines_without_echo() {
        let dir = tempfile::tempdir().unwrap();
        let supervisor = running_fake(dir.path()).await;

        let output = supervisor
            .execute_and_collect("hello", Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(output, "got hello");

        supervisor.stop().unwrap();
        wait_for_status(&supervisor, ServerStatus::Stopped).await;
    }

    #[tokio::test]
    async fn collect_times_out_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let supervisor = running_fake(dir.path()).await;

        let result = supervisor
            .execute_and_collect("quiet please", Duration::from_millis(400))
            .await;
        assert!(matches!(result, Err(SupervisorError::Timeout)));

        supervisor.stop().unwrap();
        wait_for_status(&supervisor, ServerStatus::Stopped).await;
    }

    #[tokio::test]
    async fn tps_is_parsed_from_console() {
        let dir = tempfile::tempdir().unwrap();
        let supervisor = running_fake(dir.path()).await;

        let tps = supervisor.tps().await.unwrap().unwrap();
        assert_eq!(tps.tps1m, 20.0);
        assert_eq!(tps.tps5m, 19.98);
        assert_eq!(tps.tps15m, 19.5);

        supervisor.stop().unwrap();
        wait_for_status(&supervisor, ServerStatus::Stopped).await;
    }
}
