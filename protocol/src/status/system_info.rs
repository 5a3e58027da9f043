use crate::utils::format_bytes;
use serde::{Deserialize, Serialize};

/// Host memory in bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RamInfo {
    pub total: u64,
    pub total_formatted: String,
    pub used: u64,
    pub used_formatted: String,
    pub available: u64,
    pub available_formatted: String,
    pub usage_percent: f64,
}

impl RamInfo {
    pub fn new(total: u64, available: u64) -> Self {
        let available = available.min(total);
        let used = total - available;
        let usage_percent = if total == 0 {
            0.0
        } else {
            ((used as f64 / total as f64) * 10_000.0).round() / 100.0
        };
        Self {
            total,
            total_formatted: format_bytes(total),
            used,
            used_formatted: format_bytes(used),
            available,
            available_formatted: format_bytes(available),
            usage_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CpuInfo {
    #[serde(rename = "type")]
    pub model: String,
    pub cores: u32,
    /// e.g. `"3600 MHz"`
    pub speed: String,
}
