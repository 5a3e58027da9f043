use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use paperdash_protocol::api::{
    ApiResponse, CommandRequest, ConfigResult, ConsoleResult, LinesQuery,
    PropertiesResult, PropertiesUpdateRequest, StatusResult,
};
use serde_json::Value;
use std::collections::BTreeMap;

use super::single_line;
use crate::app::AppState;
use crate::config::AppConfig;
use crate::drivers::http::{ApiError, ApiResult};

const DEFAULT_CONSOLE_LINES: usize = 100;

pub async fn start(State(state): State<AppState>) -> ApiResult {
    state.supervisor.start()?;
    Ok(Json(ApiResponse::done("Server starting")))
}

pub async fn stop(State(state): State<AppState>) -> ApiResult {
    state.supervisor.stop()?;
    Ok(Json(ApiResponse::done("Server stopping")))
}

/// Resolves once the new process has been spawned.
pub async fn restart(State(state): State<AppState>) -> ApiResult {
    state.supervisor.restart().await?;
    Ok(Json(ApiResponse::done("Server starting")))
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResult> {
    Json(StatusResult {
        status: state.supervisor.status(),
    })
}

pub async fn command(
    State(state): State<AppState>,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let command = match request.command {
        Some(command) if !command.trim().is_empty() => single_line(command)?,
        _ => return Err(ApiError::bad_request("Command is required")),
    };
    state.supervisor.execute(&command)?;
    Ok(Json(ApiResponse::done("Command executed")))
}

/// The in-memory console history, newest last.
pub async fn console(
    State(state): State<AppState>,
    Query(query): Query<LinesQuery>,
) -> ApiResult<ConsoleResult> {
    let supervisor = &state.supervisor;
    let logs = supervisor
        .logs()
        .snapshot(Some(query.lines_or(DEFAULT_CONSOLE_LINES)))
        .iter()
        .map(|entry| entry.formatted())
        .collect();
    Ok(Json(ApiResponse::ok(ConsoleResult {
        status: supervisor.status(),
        logs,
    })))
}

pub async fn get_properties(State(state): State<AppState>) -> ApiResult<PropertiesResult> {
    let properties = state.files().read_properties().await?;
    Ok(Json(ApiResponse::ok(PropertiesResult { properties })))
}

pub async fn update_properties(
    State(state): State<AppState>,
    payload: Result<Json<PropertiesUpdateRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let properties = request
        .properties
        .ok_or_else(|| ApiError::bad_request("Properties object is required"))?;

    let mut updates = BTreeMap::new();
    for (key, value) in properties {
        updates.insert(property_key(key)?, single_line(value)?.to_string());
    }
    state.files().update_properties(&updates).await?;
    Ok(Json(ApiResponse::done("Properties updated")))
}

/// A key that reads back as the same single `key=value` line.
fn property_key(key: String) -> Result<String, ApiError> {
    let key = single_line(key)?;
    if key.trim().is_empty() || key.contains(['=', '#', ':']) {
        return Err(ApiError::BadRequest(format!("Invalid property key: {:?}", key)));
    }
    Ok(key)
}

/// The file as it is on disk, including keys this daemon does not know.
pub async fn get_config(State(state): State<AppState>) -> ApiResult<ConfigResult<Value>> {
    let raw = tokio::fs::read_to_string(&state.config_path)
        .await
        .map_err(|err| ApiError::ConfigRead(err.into()))?;
    let config: Value = serde_json::from_str(&raw).map_err(|err| ApiError::ConfigRead(err.into()))?;
    Ok(Json(ApiResponse::ok(ConfigResult { config })))
}

/// Replaces `config.json`. Launch settings apply from the next start;
/// listener and driver settings after a daemon restart.
pub async fn update_config(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let Json(raw) = payload?;
    let config: AppConfig = serde_json::from_value(raw)
        .map_err(|err| ApiError::bad_request(format!("Invalid config: {}", err)))?;
    state.replace_config(config)?;
    Ok(Json(ApiResponse::done("Config saved")))
}
