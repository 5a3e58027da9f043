use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::select;

use super::{Driver, Drivers};
use crate::app::AppState;

const COLOR_CODES: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnouncementConfig {
    pub interval_secs: u64,
    pub message: String,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            message: "This server is managed with PaperDash".to_string(),
        }
    }
}

/// `tellraw @a {"text":"§<color><message>"}`, one color further each round.
pub fn announcement_command(message: &str, round: usize) -> String {
    let color = COLOR_CODES[round % COLOR_CODES.len()];
    let text = serde_json::json!({ "text": format!("§{}{}§r", color, message) });
    format!("tellraw @a {}", text)
}

/// Broadcasts the configured message in-game while the server is running.
pub struct Announcer {
    app_state: AppState,
}

impl Announcer {
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }
}

#[async_trait::async_trait]
impl Driver for Announcer {
    async fn run(&self) -> anyhow::Result<()> {
        let config = self.app_state.config().announcement;
        let period = Duration::from_secs(config.interval_secs.max(1));
        info!("announcing every {:?}", period);

        let stop = self.app_state.stop_notify.notified();
        tokio::pin!(stop);
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        let mut round = 0;

        loop {
            select! {
                _ = ticker.tick() => {
                    let supervisor = &self.app_state.supervisor;
                    if !supervisor.status().is_running() {
                        continue;
                    }
                    let command = announcement_command(&config.message, round);
                    if let Err(err) = supervisor.execute(&command) {
                        debug!("announcement skipped: {}", err);
                    }
                    round += 1;
                }
                _ = &mut stop => break,
            }
        }
        Ok(())
    }

    fn get_driver_type(&self) -> Drivers {
        Drivers::Announcer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn colors_cycle_through_all_codes() {
        assert_eq!(
            announcement_command("hi", 0),
            r#"tellraw @a {"text":"§0hi§r"}"#
        );
        assert_eq!(
            announcement_command("hi", 17),
            r#"tellraw @a {"text":"§1hi§r"}"#
        );
    }

    #[test]
    fn quotes_in_message_stay_valid_json() {
        let command = announcement_command(r#"say "hi""#, 10);
        let json: serde_json::Value =
            serde_json::from_str(command.trim_start_matches("tellraw @a ")).unwrap();
        assert_eq!(json["text"], "§asay \"hi\"§r");
    }
}
