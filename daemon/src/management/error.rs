use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of supervisor and console operations. The messages are shown to
/// dashboard users as is.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("Server is already running or starting")]
    AlreadyRunning,
    #[error("Server is not running")]
    NotRunning,
    #[error("Server jar not found at {}", .0.display())]
    JarNotFound(PathBuf),
    #[error("Executable not found at \"{0}\". Install Java or set JAVA_PATH to its full path")]
    ExecutableNotFound(String),
    #[error("Failed to start server: {0}")]
    Spawn(#[source] io::Error),
    #[error("Server console input is closed")]
    StdinClosed,
    #[error("No console output within timeout")]
    Timeout,
}
