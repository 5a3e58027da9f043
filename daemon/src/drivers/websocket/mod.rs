mod behavior;
mod connection;

pub use connection::*;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use log::{debug, error, info};
use std::net::SocketAddr;

use crate::app::AppState;

/// Upgrades to the console stream: status and recent lines first, then
/// every new line and status change as JSON text frames.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    info!("WebSocket connection received from {}", addr);
    ws.on_upgrade(move |socket| async move {
        match state
            .ws_conn_manager
            .serve_connection(socket, state.clone(), addr)
            .await
        {
            Ok(_) => debug!("WebSocket connection closed: {}", addr),
            Err(e) => error!("WebSocket error: {}: {:#}", addr, e),
        }
    })
}
