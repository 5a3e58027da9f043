use chrono::{DateTime, Utc};
use log::{debug, info};
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::config::{AppConfig, CONFIG_FILE_NAME};
use crate::drivers::websocket::WsConnManager;
use crate::drivers::GracefulShutdown;
use crate::management::Supervisor;
use crate::storage::file::Config;
use crate::storage::ServerFiles;
use tokio::sync::Notify;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
static START_TIME: LazyLock<DateTime<Utc>> = LazyLock::new(Utc::now);

pub struct ApplicationState {
    pub stop_notify: Arc<Notify>,
    pub supervisor: Arc<Supervisor>,
    pub config_path: PathBuf,
    config: RwLock<AppConfig>,
    pub ws_conn_manager: WsConnManager,
}
pub type AppState = Arc<ApplicationState>;

pub fn get_start_time() -> &'static DateTime<Utc> {
    START_TIME.deref()
}

impl ApplicationState {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        let supervisor = Supervisor::new(config.server.clone(), config.console.clone());
        Self {
            stop_notify: Arc::new(Notify::new()),
            supervisor: Arc::new(supervisor),
            config_path,
            config: RwLock::new(config),
            ws_conn_manager: WsConnManager::new(),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The server directory of the current config.
    pub fn files(&self) -> ServerFiles {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        ServerFiles::new(&config.server.server_path)
    }

    /// Writes `config` to disk and hands the launch settings to the supervisor.
    pub fn replace_config(&self, config: AppConfig) -> anyhow::Result<()> {
        AppConfig::save_config(&self.config_path, &config)?;
        self.supervisor.set_server_config(config.server.clone());
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        info!("config saved to {}", self.config_path.display());
        Ok(())
    }
}

fn init_app_state() -> anyhow::Result<AppState> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let config = AppConfig::load(&config_path)?;
    debug!("config loaded: {}", serde_json::to_string_pretty(&config)?);

    let server_path = &config.server.server_path;
    if !server_path.exists() {
        info!("creating server directory {}", server_path.display());
        std::fs::create_dir_all(server_path)?;
    }

    Ok(Arc::new(ApplicationState::new(config, config_path)))
}

pub async fn run_app() -> anyhow::Result<()> {
    let _ = get_start_time();

    let state = init_app_state()?;
    info!(
        "PaperDash {} managing {}",
        VERSION,
        state.config().server.server_path.display()
    );
    let mut gs = GracefulShutdown::new();

    state
        .config()
        .drivers
        .enabled
        .iter()
        .for_each(|driver_type| gs.add_driver(driver_type.new_driver(state.clone())));

    gs.watch(state.stop_notify.clone(), state.supervisor.clone())
        .await;
    info!("Bye.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replaced_config_is_saved_and_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let state = ApplicationState::new(AppConfig::default(), path.clone());

        let mut config = AppConfig::default();
        config.server.server_path = dir.path().join("srv");
        config.server.java_path = "/opt/jdk/bin/java".into();
        state.replace_config(config.clone()).unwrap();

        assert_eq!(AppConfig::load_config(&path).unwrap(), config);
        assert_eq!(state.files().root(), dir.path().join("srv"));
        assert_eq!(state.supervisor.server_config().java_path, "/opt/jdk/bin/java");
    }
}
