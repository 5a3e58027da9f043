//! Wire types shared between the PaperDash daemon and its dashboard.
//!
//! Everything here is plain serde data: the daemon owns all behavior.

pub mod api;
pub mod event;
pub mod management;
pub mod status;
pub mod utils;
