use paperdash_protocol::management::minecraft::PluginInfo;

use super::ServerFiles;

impl ServerFiles {
    /// `*.jar` files in the plugins directory, sorted by name. A missing
    /// directory means no plugins.
    pub async fn plugins(&self) -> anyhow::Result<Vec<PluginInfo>> {
        let mut dir = match tokio::fs::read_dir(self.plugins_dir()).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };

        let mut plugins = vec![];
        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(plugin) = PluginInfo::from_file_name(&entry.file_name().to_string_lossy()) {
                plugins.push(plugin);
            }
        }
        plugins.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(plugins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn lists_only_jars() {
        let dir = tempfile::tempdir().unwrap();
        let files = ServerFiles::new(dir.path());
        let plugins_dir = files.plugins_dir();
        std::fs::create_dir_all(plugins_dir.join("dashbordmc")).unwrap();
        std::fs::write(plugins_dir.join("LuckPerms-5.4.jar"), b"").unwrap();
        std::fs::write(plugins_dir.join("essentials.jar"), b"").unwrap();
        std::fs::write(plugins_dir.join("notes.txt"), b"").unwrap();

        let plugins = files.plugins().await.unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["essentials", "LuckPerms-5.4"]);
        assert!(plugins.iter().all(|p| p.enabled));
    }

    #[tokio::test]
    async fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = ServerFiles::new(dir.path());
        assert!(files.plugins().await.unwrap().is_empty());
    }
}
