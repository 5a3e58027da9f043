use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub trait FileIoWithBackup {
    /// Writes the given content to a file and creates a backup of the file before writing.
    fn write_with_backup<P: AsRef<Path>>(path: P, content: &str) -> Result<(), std::io::Error> {
        let path = path.as_ref();

        if path.exists() {
            let backup_path = path.with_extension("bak");

            // 写入前备份
            std::fs::copy(path, backup_path)?;
        }

        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Trait for configuration handling.
pub trait Config: FileIoWithBackup {
    type ConfigType: Serialize + for<'de> Deserialize<'de>;

    fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Self::ConfigType> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config: Self::ConfigType = serde_json::from_str(&content)
            .with_context(|| format!("invalid json in {}", path.display()))?;
        Ok(config)
    }

    fn save_config<P: AsRef<Path>>(path: P, config: &Self::ConfigType) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(config)?;
        Self::write_with_backup(path, &content)
            .with_context(|| format!("could not write {}", path.display()))?;
        Ok(())
    }

    fn load_config_or_default<P: AsRef<Path>, F: FnOnce() -> Self::ConfigType>(
        path: P,
        default: F,
    ) -> anyhow::Result<Self::ConfigType> {
        match std::fs::metadata(path.as_ref()) {
            Ok(metadata) if metadata.is_file() => Self::load_config(path),
            _ => {
                let config = default();
                Self::save_config(path, &config)?;
                Ok(config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    struct SampleFile;
    impl FileIoWithBackup for SampleFile {}
    impl Config for SampleFile {
        type ConfigType = Sample;
    }

    #[test]
    fn default_is_written_then_backed_up_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let loaded = SampleFile::load_config_or_default(&path, || Sample {
            name: "first".into(),
        })
        .unwrap();
        assert_eq!(loaded.name, "first");
        assert!(path.is_file());

        SampleFile::save_config(&path, &Sample { name: "second".into() }).unwrap();
        assert_eq!(SampleFile::load_config(&path).unwrap().name, "second");

        let backup = std::fs::read_to_string(dir.path().join("config.bak")).unwrap();
        assert!(backup.contains("first"));
    }
}
