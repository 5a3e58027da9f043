use anyhow::Context;
use std::collections::BTreeMap;

use super::{ServerFiles, SERVER_PROPERTIES};

/// Parses `key=value` lines, skipping blanks and `#` comments. Values may
/// contain `=`.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Rewrites the values of existing keys in place and appends unknown keys.
/// Comments, blank lines and the order of everything else are kept.
pub fn apply_property_updates(content: &str, updates: &BTreeMap<String, String>) -> String {
    let mut seen = Vec::with_capacity(updates.len());
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return line.to_string();
            }
            let key = trimmed.split_once('=').map_or(trimmed, |(key, _)| key).trim();
            match updates.get_key_value(key) {
                Some((key, value)) => {
                    seen.push(key.as_str());
                    format!("{}={}", key, value)
                }
                None => line.to_string(),
            }
        })
        .collect();

    lines.extend(
        updates
            .iter()
            .filter(|(key, _)| !seen.contains(&key.as_str()))
            .map(|(key, value)| format!("{}={}", key, value)),
    );

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

impl ServerFiles {
    pub async fn read_properties(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let path = self.path(SERVER_PROPERTIES);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?;
        Ok(parse_properties(&content))
    }

    /// Missing or unreadable properties yield an empty map.
    pub async fn properties_or_empty(&self) -> BTreeMap<String, String> {
        self.read_properties().await.unwrap_or_default()
    }

    pub async fn update_properties(&self, updates: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let path = self.path(SERVER_PROPERTIES);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?;
        tokio::fs::write(&path, apply_property_updates(&content, updates))
            .await
            .with_context(|| format!("could not write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "#Minecraft server properties\n\
                          #Thu May 01 12:00:00 UTC 2024\n\
                          motd=A Minecraft Server\n\
                          difficulty=easy\n\
                          \n\
                          generator-settings={\"a\"\\=1}\n\
                          level-name=world\n";

    fn updates(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_skips_comments_and_keeps_equals_in_values() {
        let props = parse_properties("# c\nmotd=a=b\n\n  pvp = true \nbroken\n");
        assert_eq!(props.len(), 2);
        assert_eq!(props["motd"], "a=b");
        assert_eq!(props["pvp"], "true");
    }

    #[test]
    fn update_rewrites_in_place() {
        let out = apply_property_updates(SAMPLE, &updates(&[("motd", "X")]));
        assert_eq!(out, SAMPLE.replace("motd=A Minecraft Server", "motd=X"));
    }

    #[test]
    fn unknown_keys_are_appended() {
        let out = apply_property_updates(
            SAMPLE,
            &updates(&[("difficulty", "hard"), ("white-list", "true")]),
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[3], "difficulty=hard");
        assert_eq!(lines.last(), Some(&"white-list=true"));
        assert_eq!(lines.len(), SAMPLE.lines().count() + 1);
        assert!(out.ends_with('\n'));
    }

    #[tokio::test]
    async fn update_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SERVER_PROPERTIES), SAMPLE).unwrap();
        let files = ServerFiles::new(dir.path());

        files
            .update_properties(&updates(&[("max-players", "40")]))
            .await
            .unwrap();
        let props = files.read_properties().await.unwrap();
        assert_eq!(props["max-players"], "40");
        assert_eq!(props["level-name"], "world");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let files = ServerFiles::new(dir.path());
        assert!(files.read_properties().await.is_err());
        assert!(files.properties_or_empty().await.is_empty());
    }
}
