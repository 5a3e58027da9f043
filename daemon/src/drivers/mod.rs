mod announcer;
mod config;
mod driver;
mod graceful_shutdown;
pub mod http;
pub mod websocket;

use crate::app::AppState;
pub use announcer::{AnnouncementConfig, Announcer};
pub use config::DriversConfig;
pub use driver::Driver;
pub use graceful_shutdown::GracefulShutdown;
use http::HttpDriver;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Drivers {
    /// REST API and the WebSocket push channel on one port.
    Http,
    /// Periodic in-game broadcast.
    Announcer,
}

impl Drivers {
    pub fn new_driver(&self, app_state: AppState) -> Arc<dyn Driver> {
        match self {
            Drivers::Http => Arc::new(HttpDriver::new(app_state)),
            Drivers::Announcer => Arc::new(Announcer::new(app_state)),
        }
    }
}
