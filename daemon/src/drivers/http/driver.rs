use anyhow::Context;
use log::info;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use super::router;
use crate::app::AppState;
use crate::drivers::{Driver, Drivers};

/// Serves the REST API and the console WebSocket on one listener.
pub struct HttpDriver {
    app_state: AppState,
}

impl HttpDriver {
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }
}

#[async_trait::async_trait]
impl Driver for HttpDriver {
    async fn run(&self) -> anyhow::Result<()> {
        let uni_cfg = self.app_state.config().drivers.http;
        let addr = SocketAddr::new(uni_cfg.host, uni_cfg.port);

        let app = router(self.app_state.clone())
            .into_make_service_with_connect_info::<SocketAddr>();
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        info!("PaperMC dashboard API listening on http://{}", addr);
        self.app_state
            .supervisor
            .logs()
            .append(format!("API server started on port {}", uni_cfg.port));

        let stop_token = self.app_state.stop_notify.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                stop_token.notified().await;
                info!("Shutdown signal received, closing connections...");
            })
            .await
            .context("http server failed")?;
        Ok(())
    }

    fn get_driver_type(&self) -> Drivers {
        Drivers::Http
    }
}
