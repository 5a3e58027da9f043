use serde::{Deserialize, Serialize};

/// Ticks per second averaged over the last 1, 5 and 15 minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TpsSample {
    pub tps1m: f64,
    pub tps5m: f64,
    pub tps15m: f64,
}
