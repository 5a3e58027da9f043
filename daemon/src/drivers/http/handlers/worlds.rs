use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use log::info;
use paperdash_protocol::api::{ApiResponse, Empty, WorldDeleteRequest};
use paperdash_protocol::management::minecraft::WorldsReport;

use crate::app::AppState;
use crate::drivers::http::{ApiError, ApiResult};

pub async fn list(State(state): State<AppState>) -> ApiResult<WorldsReport> {
    let report = state.files().worlds().await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// Deleting the world of a running server would corrupt it, so this is
/// refused unless the server is stopped.
pub async fn delete(
    State(state): State<AppState>,
    payload: Result<Json<WorldDeleteRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let world = match request.world {
        Some(world) if !world.trim().is_empty() => world,
        _ => return Err(ApiError::Failure("World name required".to_string())),
    };
    if !state.supervisor.status().is_stopped() {
        return Err(ApiError::Failure(
            "Stop the server before deleting a world".to_string(),
        ));
    }

    state
        .files()
        .delete_world(&world)
        .await
        .map_err(|err| ApiError::Failure(err.to_string()))?;
    info!("world {} deleted", world);
    Ok(Json(ApiResponse::ok(Empty {})))
}
