use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub file: String,
    pub enabled: bool,
}

impl PluginInfo {
    /// `None` unless `file` is a `.jar`.
    pub fn from_file_name(file: &str) -> Option<Self> {
        let name = file.strip_suffix(".jar")?;
        Some(Self {
            name: name.to_string(),
            file: file.to_string(),
            enabled: true,
        })
    }
}
