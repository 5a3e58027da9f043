use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub const SERVER_PROPERTIES: &str = "server.properties";
pub const USER_CACHE: &str = "usercache.json";
pub const BANNED_PLAYERS: &str = "banned-players.json";
pub const PLUGINS_DIR: &str = "plugins";
/// Data directory of the companion dashboard plugin.
pub const DASHBOARD_PLUGIN_DIR: &str = "dashbordmc";

/// The flat files of one PaperMC server directory.
#[derive(Debug, Clone)]
pub struct ServerFiles {
    root: PathBuf,
}

impl ServerFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join(PLUGINS_DIR)
    }

    pub fn dashboard_dir(&self) -> PathBuf {
        self.plugins_dir().join(DASHBOARD_PLUGIN_DIR)
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("invalid json in {}", path.display()))
    }
}

// 判断 path 规范化后是否严格位于 root 之下
pub(crate) fn validate_path(path: &str, root: &str) -> bool {
    let normalized_path = normalize_path(path);
    let normalized_root = normalize_path(root);
    normalized_path.len() > normalized_root.len() && normalized_path.starts_with(&normalized_root)
}

// 折叠 . 与 ..，得到以 / 结尾的规范路径
pub(crate) fn normalize_path(path: &str) -> String {
    let mut stack: Vec<&str> = vec![];
    for part in path.split(['\\', '/']).filter(|s| !s.is_empty()) {
        match part {
            "." => {}
            ".." => {
                if stack.last().is_some_and(|last| *last != "..") {
                    stack.pop();
                } else {
                    stack.push(part);
                }
            }
            _ => stack.push(part),
        }
    }

    let prefix = if path.starts_with('/') { "/" } else { "" };
    stack.iter().fold(prefix.to_string(), |mut path, part| {
        path.push_str(part);
        path.push('/');
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_dots() {
        assert_eq!(normalize_path("srv/./world/../world_nether"), "srv/world_nether/");
        assert_eq!(normalize_path("/srv//paper/"), "/srv/paper/");
        assert_eq!(normalize_path("../up"), "../up/");
    }

    #[test]
    fn validate_rejects_escapes_and_root_itself() {
        assert!(validate_path("srv/world", "srv"));
        assert!(!validate_path("srv/../etc", "srv"));
        assert!(!validate_path("srv/.", "srv"));
        assert!(!validate_path("srv-other/world", "srv"));
    }
}
