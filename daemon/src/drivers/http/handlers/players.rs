use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use paperdash_protocol::api::{
    ApiResponse, BanRequest, BannedPlayersResult, ExperienceRequest, GiveRequest, KillStatsRequest,
    KillsResult, MessageRequest, PlayerCommandRequest, PlayerDetailsResult, PlayersResult,
    RemoveItemRequest, TeleportRequest, UnbanRequest,
};

use super::{required, single_line};
use crate::app::AppState;
use crate::drivers::http::{ApiError, ApiResult};
use crate::management::SupervisorError;

const DEFAULT_BAN_REASON: &str = "Banned by admin";

fn player_name(name: &str) -> Result<&str, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::bad_request("Player name is required"));
    }
    single_line(name)
}

fn body_player_name(name: Option<String>) -> Result<String, ApiError> {
    match name {
        Some(name) if !name.trim().is_empty() => single_line(name),
        _ => Err(ApiError::bad_request("Player name is required")),
    }
}

pub async fn list(State(state): State<AppState>) -> ApiResult<PlayersResult> {
    let running = state.supervisor.status().is_running();
    let lists = state.files().players(running).await;
    let message = format!("{} player(s) online", lists.online.len());
    Ok(Json(
        ApiResponse::ok(PlayersResult {
            players: lists.online,
            all_players: lists.all,
        })
        .with_message(message),
    ))
}

/// The dashboard plugin's last snapshot of the player.
pub async fn details(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<PlayerDetailsResult> {
    if !state.supervisor.status().is_running() {
        return Err(SupervisorError::NotRunning.into());
    }
    let raw = state.files().player_data(player_name(&name)?).await?;
    Ok(Json(ApiResponse::ok(PlayerDetailsResult { raw })))
}

pub async fn banned(State(state): State<AppState>) -> ApiResult<BannedPlayersResult> {
    let banned_players = state.files().banned_players().await;
    let message = format!("{} banned player(s)", banned_players.len());
    Ok(Json(
        ApiResponse::ok(BannedPlayersResult { banned_players }).with_message(message),
    ))
}

/// `POST /api/player/cmd/{name}` kills the player; `command` is only echoed.
pub async fn kill(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<PlayerCommandRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let name = player_name(&name)?;
    state.supervisor.execute(&format!("kill {}", name))?;
    Ok(Json(ApiResponse::done(format!(
        "Executed command {} on player {}",
        request.command.as_deref().unwrap_or("kill"),
        name
    ))))
}

pub async fn give(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<GiveRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let item = required(request.item, "Item is required")?;
    let amount = required(request.amount, "Amount is required")?;
    let name = player_name(&name)?;
    state
        .supervisor
        .execute(&format!("give {} {} {}", name, item, amount))?;
    Ok(Json(ApiResponse::done(format!(
        "Gave {} of {} to player {}",
        amount, item, name
    ))))
}

pub async fn give_xp(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<ExperienceRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let xp = required(request.xp, "XP amount is required")?;
    let name = player_name(&name)?;
    state.supervisor.execute(&format!("xp add {} {}", name, xp))?;
    Ok(Json(ApiResponse::done(format!(
        "Added {} XP to player {}",
        xp, name
    ))))
}

/// Shows `text` as a title on the player's screen.
pub async fn message(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let name = player_name(&name)?;
    let text = request.text.unwrap_or_default();
    // a JSON string is a valid text component and keeps quotes escaped
    let component = serde_json::to_string(single_line(&text)?)
        .map_err(|err| ApiError::Internal(err.into()))?;
    state
        .supervisor
        .execute(&format!("title {} title {}", name, component))?;
    Ok(Json(ApiResponse::done(format!("Message sent to {}", name))))
}

pub async fn ban(
    State(state): State<AppState>,
    payload: Result<Json<BanRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let name = body_player_name(request.player_name)?;
    let reason = match request.reason {
        Some(reason) if !reason.trim().is_empty() => single_line(reason)?,
        _ => DEFAULT_BAN_REASON.to_string(),
    };

    let supervisor = &state.supervisor;
    supervisor.execute(&format!("ban {} {}", name, reason))?;
    supervisor
        .logs()
        .append(format!("Player banned: {} (Reason: {})", name, reason));
    Ok(Json(ApiResponse::done(format!(
        "Player {} has been banned",
        name
    ))))
}

pub async fn unban(
    State(state): State<AppState>,
    payload: Result<Json<UnbanRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    let name = body_player_name(request.player_name)?;

    let supervisor = &state.supervisor;
    supervisor.execute(&format!("pardon {}", name))?;
    supervisor
        .logs()
        .append(format!("Player unbanned: {}", name));
    Ok(Json(ApiResponse::done(format!(
        "Player {} has been unbanned",
        name
    ))))
}

pub async fn teleport(
    State(state): State<AppState>,
    payload: Result<Json<TeleportRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    const MISSING: &str = "Missing required fields: player, X, Y, Z";
    let player = required(request.player, MISSING)?;
    let x = required(request.x, MISSING)?;
    let y = required(request.y, MISSING)?;
    let z = required(request.z, MISSING)?;

    state
        .supervisor
        .execute(&format!("tp {} {} {} {}", player, x, y, z))?;
    Ok(Json(ApiResponse::done(format!(
        "Player {} teleported to {} {} {}",
        player, x, y, z
    ))))
}

pub async fn remove_item(
    State(state): State<AppState>,
    payload: Result<Json<RemoveItemRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = payload?;
    const MISSING: &str = "Missing required fields: player, item";
    let player = required(request.player, MISSING)?;
    let item = required(request.item, MISSING)?;
    let amount = required(request.amount, MISSING)?;

    state
        .supervisor
        .execute(&format!("clear {} {} {}", player, item, amount))?;
    Ok(Json(ApiResponse::done(format!(
        "Cleared {} of {} from {}",
        amount, item, player
    ))))
}

/// Kill counters by player uuid; `success` is false when none are recorded.
pub async fn kills(
    State(state): State<AppState>,
    payload: Result<Json<KillStatsRequest>, JsonRejection>,
) -> ApiResult<KillsResult> {
    let Json(request) = payload?;
    let uid = match request.uid {
        Some(uid) if !uid.trim().is_empty() => uid,
        _ => return Err(ApiError::Failure("uid missing".to_string())),
    };

    let kills = state.files().kill_stats(&uid).await?;
    Ok(Json(ApiResponse {
        success: kills.is_some(),
        message: None,
        data: KillsResult { kills },
    }))
}
