use anyhow::{bail, Context};
use paperdash_protocol::management::minecraft::{WorldInfo, WorldsReport};
use paperdash_protocol::utils::format_bytes;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use super::server_files::validate_path;
use super::ServerFiles;

const DEFAULT_MAX_PLAYERS: u32 = 20;

/// Recursive size of a directory in bytes; unreadable parts count as zero.
/// Symlinks are not followed.
pub fn dir_size(path: &Path) -> u64 {
    let Ok(entries) = std::fs::read_dir(path) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| match entry.metadata() {
            Ok(meta) if meta.is_dir() => dir_size(&entry.path()),
            Ok(meta) if meta.is_file() => meta.len(),
            _ => 0,
        })
        .sum()
}

fn difficulty_name(value: Option<&String>) -> String {
    match value.map(|v| v.as_str()) {
        Some("0") => "peaceful".to_string(),
        Some("1") => "easy".to_string(),
        Some("2") => "normal".to_string(),
        Some("3") => "hard".to_string(),
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "unknown".to_string(),
    }
}

fn non_empty(value: Option<&String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

impl ServerFiles {
    pub async fn worlds(&self) -> anyhow::Result<WorldsReport> {
        let props = self.properties_or_empty().await;
        let level = non_empty(props.get("level-name"), "world");

        let dimensions = [
            ("Overworld", level.clone()),
            ("Nether", format!("{}_nether", level)),
            ("The End", format!("{}_the_end", level)),
        ];
        let root = self.root().to_path_buf();
        let sizes = tokio::task::spawn_blocking({
            let dirs: Vec<PathBuf> = dimensions.iter().map(|(_, dir)| root.join(dir)).collect();
            move || dirs.iter().map(|dir| dir_size(dir)).collect::<Vec<u64>>()
        })
        .await
        .context("world size task failed")?;

        let worlds: Vec<WorldInfo> = dimensions
            .into_iter()
            .zip(sizes)
            .map(|((name, path), size)| WorldInfo::new(name, path, size))
            .collect();
        let total: u64 = worlds.iter().map(|w| w.size).sum();

        Ok(WorldsReport {
            worlds,
            difficulty: difficulty_name(props.get("difficulty")),
            world_type: non_empty(props.get("level-type"), "default"),
            total_world_size: total,
            total_world_size_formatted: format_bytes(total),
        })
    }

    pub fn max_players(props: &BTreeMap<String, String>) -> u32 {
        props
            .get("max-players")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_PLAYERS)
    }

    /// Removes a world directory below the server root.
    pub async fn delete_world(&self, world: &str) -> anyhow::Result<()> {
        let root = self.root().to_string_lossy().to_string();
        let target = format!("{}/{}", root, world);
        let relative = Path::new(world)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir | Component::ParentDir));
        if world.trim().is_empty() || !relative || !validate_path(&target, &root) {
            bail!("Invalid world name");
        }

        let path = self.path(world);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => {}
            _ => bail!("World does not exist"),
        }
        tokio::fs::remove_dir_all(&path)
            .await
            .with_context(|| format!("could not delete {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn server() -> (tempfile::TempDir, ServerFiles) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("world/region")).unwrap();
        std::fs::write(dir.path().join("world/level.dat"), vec![0u8; 1024]).unwrap();
        std::fs::write(dir.path().join("world/region/r.0.0.mca"), vec![0u8; 2048]).unwrap();
        std::fs::create_dir_all(dir.path().join("world_nether")).unwrap();
        let files = ServerFiles::new(dir.path());
        (dir, files)
    }

    #[tokio::test]
    async fn report_sizes_and_properties() {
        let (dir, files) = server();
        std::fs::write(
            dir.path().join("server.properties"),
            "difficulty=3\nlevel-type=minecraft\\:flat\n",
        )
        .unwrap();

        let report = files.worlds().await.unwrap();
        assert_eq!(report.worlds.len(), 3);
        assert_eq!(report.worlds[0].name, "Overworld");
        assert_eq!(report.worlds[0].size, 3072);
        assert_eq!(report.worlds[0].size_formatted, "3 KB");
        assert_eq!(report.worlds[1].size, 0);
        assert_eq!(report.worlds[2].path, "world_the_end");
        assert_eq!(report.total_world_size, 3072);
        assert_eq!(report.difficulty, "hard");
        assert_eq!(report.world_type, "minecraft\\:flat");
    }

    #[tokio::test]
    async fn defaults_without_properties() {
        let (_dir, files) = server();
        let report = files.worlds().await.unwrap();
        assert_eq!(report.difficulty, "unknown");
        assert_eq!(report.world_type, "default");
        assert_eq!(ServerFiles::max_players(&BTreeMap::new()), 20);
    }

    #[tokio::test]
    async fn delete_world_stays_inside_the_server() {
        let (dir, files) = server();

        assert!(files.delete_world("../outside").await.is_err());
        assert!(files.delete_world(".").await.is_err());
        assert!(files.delete_world("").await.is_err());
        assert!(files.delete_world("/tmp").await.is_err());
        assert_eq!(
            files.delete_world("world_the_end").await.unwrap_err().to_string(),
            "World does not exist"
        );

        files.delete_world("world").await.unwrap();
        assert!(!dir.path().join("world").exists());
        assert!(dir.path().join("world_nether").exists());
    }
}
