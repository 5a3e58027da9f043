pub mod file;
pub mod java;
mod logs;
mod players;
mod plugins;
mod properties;
mod server_files;
mod worlds;

pub use server_files::*;
