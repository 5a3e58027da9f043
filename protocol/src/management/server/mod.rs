mod config;
mod log;
mod status;
mod tps;

pub use config::*;
pub use log::*;
pub use status::*;
pub use tps::*;
