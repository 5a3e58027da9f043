use crate::management::minecraft::{PluginInfo, WorldInfo};
use crate::management::server::ServerStatus;
use crate::status::{CpuInfo, RamInfo};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerSummary {
    pub status: ServerStatus,
    pub difficulty: String,
    pub world_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCounts {
    pub online: usize,
    pub total: usize,
    pub max_players: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginSummary {
    pub total: usize,
    pub list: Vec<PluginInfo>,
}

/// Payload of `GET /api/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerStats {
    pub server: ServerSummary,
    pub worlds: Vec<WorldInfo>,
    pub players: PlayerCounts,
    pub ram: RamInfo,
    pub cpu: CpuInfo,
    pub plugins: PluginSummary,
}
