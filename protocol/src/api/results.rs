use crate::management::minecraft::{BanRecord, KillStats, PlayerData, PlayerRecord, PluginInfo};
use crate::management::server::{ServerStatus, TpsSample};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertiesResult {
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginsResult {
    pub plugins: Vec<PluginInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayersResult {
    /// Online players only.
    pub players: Vec<PlayerRecord>,
    /// Everyone in `usercache.json`.
    pub all_players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerDetailsResult {
    pub raw: Option<PlayerData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BannedPlayersResult {
    pub banned_players: Vec<BanRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KillsResult {
    pub kills: Option<KillStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TpsResult {
    pub data: Option<TpsSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogsResult {
    pub logs: Vec<String>,
    pub total_lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleResult {
    pub status: ServerStatus,
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigResult<T> {
    pub config: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResult {
    pub status: ServerStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResult {
    pub status: String,
    pub server_status: ServerStatus,
    pub version: String,
    pub uptime_secs: i64,
    pub connections: usize,
}
