use log::info;
use paperdash_protocol::management::server::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::drivers::{AnnouncementConfig, DriversConfig};
use crate::management::ConsoleConfig;
use crate::storage::file::{Config, FileIoWithBackup};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Everything in `config.json`.
///
/// The launch settings sit at the top level (`javaPath`, `serverJar`, ...)
/// so files written for the original dashboard keep working.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(flatten)]
    pub server: ServerConfig,
    #[serde(default)]
    pub drivers: DriversConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub announcement: AnnouncementConfig,
}

impl FileIoWithBackup for AppConfig {}

impl Config for AppConfig {
    type ConfigType = AppConfig;
}

impl AppConfig {
    /// Loads (or creates) the config file and applies environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<AppConfig> {
        let mut config = Self::load_config_or_default(path, Self::default)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// `SERVER_PATH`, `SERVER_JAR`, `JAVA_PATH` and `PORT` win over the file.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("SERVER_PATH").filter(|v| !v.is_empty()) {
            info!("SERVER_PATH overrides serverPath: {}", path);
            self.server.server_path = PathBuf::from(path);
        }
        if let Some(jar) = var("SERVER_JAR").filter(|v| !v.is_empty()) {
            info!("SERVER_JAR overrides serverJar: {}", jar);
            self.server.server_jar = jar;
        }
        if let Some(java) = var("JAVA_PATH").filter(|v| !v.is_empty()) {
            info!("JAVA_PATH overrides javaPath: {}", java);
            self.server.java_path = java;
        }
        if let Some(port) = var("PORT").and_then(|v| v.parse::<u16>().ok()) {
            self.drivers.http.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn original_dashboard_config_is_accepted() {
        let config: AppConfig =
            serde_json::from_str(r#"{"serverPath":"paper-server","serverJar":"paper-1.21.jar"}"#)
                .unwrap();
        assert_eq!(config.server.server_jar, "paper-1.21.jar");
        assert_eq!(config.drivers, DriversConfig::default());
        assert_eq!(config.console, ConsoleConfig::default());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            "SERVER_PATH" => Some("/srv/paper".to_string()),
            "JAVA_PATH" => Some("/opt/jdk-21/bin/java".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        });
        assert_eq!(config.server.server_path, PathBuf::from("/srv/paper"));
        assert_eq!(config.server.java_path, "/opt/jdk-21/bin/java");
        assert_eq!(config.server.server_jar, ServerConfig::default().server_jar);
        assert_eq!(config.drivers.http.port, 8080);
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.drivers.http.port, 3001);
    }
}
