mod driver;
mod error;
mod handlers;

pub use driver::HttpDriver;
pub use error::{ApiError, ApiResult};

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::app::AppState;
use crate::drivers::websocket::ws_handler;
use handlers::{players, server, system, worlds};

/// The whole HTTP surface: REST under `/api`, the console stream on `/` and `/ws`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .route("/api/server/start", post(server::start))
        .route("/api/server/stop", post(server::stop))
        .route("/api/server/restart", post(server::restart))
        .route("/api/server/status", get(server::status))
        .route("/api/server/command", post(server::command))
        .route(
            "/api/server/properties",
            get(server::get_properties).post(server::update_properties),
        )
        .route("/api/console", get(server::console))
        .route("/api/config", get(server::get_config).post(server::update_config))
        .route("/api/plugins", get(system::plugins))
        .route("/api/players", get(players::list))
        .route("/api/player/{name}", get(players::details))
        .route("/api/player/cmd/{name}", post(players::kill))
        .route("/api/players/give/{name}", post(players::give))
        .route("/api/players/givexp/{name}", post(players::give_xp))
        .route("/api/players/message/{name}", post(players::message))
        .route("/api/players/ban", post(players::ban))
        .route("/api/players/unban", post(players::unban))
        .route("/api/players/tp", post(players::teleport))
        .route("/api/players/removeitem", post(players::remove_item))
        .route("/api/players/getkill", post(players::kills))
        .route("/api/banned-players", get(players::banned))
        .route("/api/worlds", get(worlds::list))
        .route("/api/worlds/delete", post(worlds::delete))
        .route("/api/tps", get(system::tps))
        .route("/api/stats", get(system::stats))
        .route("/api/logs", get(system::logs))
        .route("/api/health", get(system::health))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
}
