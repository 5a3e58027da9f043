use axum::extract::{Query, State};
use axum::Json;
use paperdash_protocol::api::{
    ApiResponse, HealthResult, LinesQuery, LogsResult, PluginsResult, TpsResult,
};
use paperdash_protocol::status::ServerStats;

use crate::app::{get_start_time, AppState, VERSION};
use crate::drivers::http::ApiResult;
use crate::utils::status::get_server_stats;

const DEFAULT_LOG_LINES: usize = 100;

pub async fn health(State(state): State<AppState>) -> Json<HealthResult> {
    Json(HealthResult {
        status: "ok".to_string(),
        server_status: state.supervisor.status(),
        version: VERSION.to_string(),
        uptime_secs: (chrono::Utc::now() - *get_start_time()).num_seconds(),
        connections: state.ws_conn_manager.count(),
    })
}

pub async fn plugins(State(state): State<AppState>) -> ApiResult<PluginsResult> {
    let plugins = state.files().plugins().await?;
    Ok(Json(ApiResponse::ok(PluginsResult { plugins })))
}

/// Asks the server for `tps` and parses the reply.
pub async fn tps(State(state): State<AppState>) -> ApiResult<TpsResult> {
    let data = state.supervisor.tps().await?;
    Ok(Json(ApiResponse::ok(TpsResult { data })))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<ServerStats> {
    let stats = get_server_stats(&state.supervisor, &state.files()).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// Tail of `logs/latest.log`, `?lines=N` (default 100).
pub async fn logs(
    State(state): State<AppState>,
    Query(query): Query<LinesQuery>,
) -> ApiResult<LogsResult> {
    let logs = state
        .files()
        .latest_log(query.lines_or(DEFAULT_LOG_LINES))
        .await?;
    Ok(Json(ApiResponse::ok(logs)))
}
