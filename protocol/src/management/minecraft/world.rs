use crate::utils::format_bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorldInfo {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub size_formatted: String,
}

impl WorldInfo {
    pub fn new(name: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
            size_formatted: format_bytes(size),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorldsReport {
    pub worlds: Vec<WorldInfo>,
    pub difficulty: String,
    pub world_type: String,
    pub total_world_size: u64,
    pub total_world_size_formatted: String,
}
