use crate::management::comm::ProcessStartInfo;
use crate::management::SupervisorError;
use crate::storage::java::find_java_executable;
use paperdash_protocol::management::server::{ServerConfig, TargetType};
use serde::{Deserialize, Serialize};
use std::path::{self, Path, PathBuf};
use std::time::Duration;

/// Tuning of the console pipeline, the `console` block of `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleConfig {
    /// Lines kept in the ring buffer.
    pub capacity: usize,
    /// Lines replayed to a freshly connected dashboard.
    pub replay: usize,
    pub collect_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub stop_grace_secs: u64,
    pub restart_delay_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            replay: 50,
            collect_timeout_ms: 4000,
            poll_interval_ms: 100,
            stop_grace_secs: 10,
            restart_delay_secs: 3,
        }
    }
}

impl ConsoleConfig {
    pub fn collect_timeout(&self) -> Duration {
        Duration::from_millis(self.collect_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn stop_grace(&self) -> Duration {
        Duration::from_secs(self.stop_grace_secs)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_secs(self.restart_delay_secs)
    }
}

pub trait ServerConfigExt {
    fn get_working_dir(&self) -> PathBuf;

    /// Resolves the program and arguments, checking that the target exists.
    fn get_start_info(&self) -> Result<ProcessStartInfo, SupervisorError>;
}

impl ServerConfigExt for ServerConfig {
    fn get_working_dir(&self) -> PathBuf {
        path::absolute(&self.server_path).unwrap_or_else(|_| self.server_path.clone())
    }

    fn get_start_info(&self) -> Result<ProcessStartInfo, SupervisorError> {
        let working_dir = self.get_working_dir();

        match self.target_type {
            TargetType::Jar => {
                let jar = working_dir.join(&self.server_jar);
                if !jar.is_file() {
                    return Err(SupervisorError::JarNotFound(jar));
                }

                let mut args = self.java_args.clone();
                args.push("-jar".into());
                args.push(self.server_jar.clone());
                args.extend_from_slice(&self.arguments);

                Ok(ProcessStartInfo {
                    target: find_java_executable(&self.java_path),
                    args,
                    working_dir,
                })
            }
            TargetType::Executable => {
                let local = working_dir.join(&self.server_jar);
                let target = if local.is_file() {
                    local.to_string_lossy().to_string()
                } else if Path::new(&self.server_jar).components().count() > 1 {
                    return Err(SupervisorError::ExecutableNotFound(
                        local.to_string_lossy().to_string(),
                    ));
                } else {
                    // bare program name, resolved through PATH at spawn time
                    self.server_jar.clone()
                };

                Ok(ProcessStartInfo {
                    target,
                    args: self.arguments.clone(),
                    working_dir,
                })
            }
        }
    }
}
