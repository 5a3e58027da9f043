pub mod comm;
pub mod config;
mod console;
mod error;
pub mod log_buffer;
pub mod minecraft;
mod supervisor;

pub use config::ConsoleConfig;
pub use error::SupervisorError;
pub use supervisor::Supervisor;

#[cfg(all(test, unix))]
pub(crate) mod testing;
