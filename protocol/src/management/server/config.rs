use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// `java <java_args> -jar <server_jar> <arguments>`
    #[default]
    Jar,
    /// `<server_jar> <arguments>`, for wrapper scripts and native launchers.
    Executable,
}

/// How the PaperMC server is launched. Part of `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub java_path: String,
    pub java_args: Vec<String>,
    pub server_path: PathBuf,
    /// The jar file, or the program itself for [`TargetType::Executable`].
    pub server_jar: String,
    pub target_type: TargetType,
    pub arguments: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            java_path: "java".to_string(),
            java_args: vec!["-Xmx2G".to_string(), "-Xms1G".to_string()],
            server_path: PathBuf::from("paper-server"),
            server_jar: "paper-1.21.4-232.jar".to_string(),
            target_type: TargetType::Jar,
            arguments: vec!["--nogui".to_string()],
        }
    }
}
