use anyhow::Context;
use log::{debug, warn};
use paperdash_protocol::management::minecraft::{
    BanRecord, KillStats, OnlineEntry, PlayerData, PlayerRecord, UserCacheEntry,
};
use serde_json::Value;

use super::{ServerFiles, BANNED_PLAYERS, USER_CACHE};

const PLAYER_DATA_DIR: &str = "playerdata";
const ONLINE_FILE: &str = "online.json";
const KILLS_FILE: &str = "kills.json";

/// Player names end up in file paths; Java and Floodgate names both fit this.
pub fn is_valid_player_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 32
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Every known player, and those of them currently online.
#[derive(Debug, Clone, Default)]
pub struct PlayerLists {
    pub online: Vec<PlayerRecord>,
    pub all: Vec<PlayerRecord>,
}

impl ServerFiles {
    pub async fn user_cache(&self) -> anyhow::Result<Vec<UserCacheEntry>> {
        Self::read_json(&self.path(USER_CACHE)).await
    }

    /// The dashboard plugin's snapshot of a player, `None` if there is none.
    pub async fn player_data(&self, name: &str) -> anyhow::Result<Option<PlayerData>> {
        if !is_valid_player_name(name) {
            anyhow::bail!("Invalid player name: {}", name);
        }
        let path = self
            .dashboard_dir()
            .join(PLAYER_DATA_DIR)
            .join(format!("{}.json", name));
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        Self::read_json(&path).await.map(Some)
    }

    async fn skin_of(&self, name: &str) -> Option<String> {
        match self.player_data(name).await {
            Ok(data) => data?.skin_texture().map(str::to_string),
            Err(err) => {
                debug!("no player data for {}: {:#}", name, err);
                None
            }
        }
    }

    /// `online.json` is an object keyed by player or a plain array.
    pub async fn online_players(&self) -> anyhow::Result<Vec<OnlineEntry>> {
        let raw: Value = Self::read_json(&self.dashboard_dir().join(ONLINE_FILE)).await?;
        let values = match raw {
            Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
            Value::Array(list) => list,
            _ => vec![],
        };
        Ok(values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect())
    }

    /// Known players with skins; online ones only when `include_online`.
    pub async fn players(&self, include_online: bool) -> PlayerLists {
        let cache = self.user_cache().await.unwrap_or_else(|err| {
            warn!("Could not read {}: {:#}", USER_CACHE, err);
            vec![]
        });

        let mut all = Vec::with_capacity(cache.len());
        for entry in cache {
            let skin = self.skin_of(&entry.name).await;
            all.push(PlayerRecord::from_cache(entry, skin));
        }

        let online = if include_online {
            match self.online_players().await {
                Ok(entries) => entries
                    .into_iter()
                    .map(|entry| {
                        all.iter()
                            .find(|known| {
                                entry.uuid.as_deref() == Some(known.uuid.as_str())
                                    || entry.name.as_deref() == Some(known.name.as_str())
                            })
                            .map(|known| known.clone().online())
                            .unwrap_or_else(|| PlayerRecord::from(entry))
                    })
                    .collect(),
                Err(err) => {
                    warn!("Could not read {}: {:#}", ONLINE_FILE, err);
                    vec![]
                }
            }
        } else {
            vec![]
        };

        PlayerLists { online, all }
    }

    /// A missing or malformed ban list reads as empty.
    pub async fn banned_players(&self) -> Vec<BanRecord> {
        let raw: Value = match Self::read_json(&self.path(BANNED_PLAYERS)).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Could not read {}: {:#}", BANNED_PLAYERS, err);
                return vec![];
            }
        };
        match raw {
            Value::Array(list) => list
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            _ => vec![],
        }
    }

    /// Kill counters recorded for the player with uuid `uid`.
    pub async fn kill_stats(&self, uid: &str) -> anyhow::Result<Option<KillStats>> {
        let path = self.dashboard_dir().join(KILLS_FILE);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            debug!("no kill stats recorded yet at {}", path.display());
            return Ok(None);
        }
        let mut raw: Value = Self::read_json(&path).await?;
        match raw.get_mut(uid).map(Value::take) {
            Some(Value::Null) | None => Ok(None),
            Some(stats) => serde_json::from_value(stats)
                .map(Some)
                .with_context(|| format!("unexpected kill stats for {}", uid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperdash_protocol::management::minecraft::{Presence, DEFAULT_SKIN};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;

    const NOTCH: &str = "069a79f4-44e9-4726-a5be-fca90e38aaf5";
    const JEB: &str = "853c80ef-3c37-49fd-aa49-938b674adae6";

    fn write_json(path: &Path, value: Value) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, serde_json::to_string(&value).unwrap()).unwrap();
    }

    fn server_with_players() -> (tempfile::TempDir, ServerFiles) {
        let dir = tempfile::tempdir().unwrap();
        let files = ServerFiles::new(dir.path());
        write_json(
            &files.path(USER_CACHE),
            json!([
                { "name": "Notch", "uuid": NOTCH, "expiresOn": "2024-06-01 12:00:00 +0000" },
                { "name": "jeb_", "uuid": JEB }
            ]),
        );
        write_json(
            &files.dashboard_dir().join("playerdata/Notch.json"),
            json!({ "player": "Notch", "skin": { "textures_base64": "abc" } }),
        );
        (dir, files)
    }

    #[tokio::test]
    async fn players_get_skins_or_default() {
        let (_dir, files) = server_with_players();
        let lists = files.players(false).await;

        assert_eq!(lists.all.len(), 2);
        assert_eq!(lists.all[0].skin, "abc");
        assert_eq!(lists.all[1].skin, DEFAULT_SKIN);
        assert!(lists.online.is_empty());
    }

    #[tokio::test]
    async fn online_players_are_merged_with_known_records() {
        let (_dir, files) = server_with_players();
        write_json(
            &files.dashboard_dir().join(ONLINE_FILE),
            json!({
                "a": { "name": "Notch", "uuid": NOTCH },
                "b": { "name": "Stranger", "uuid": "x" }
            }),
        );

        let lists = files.players(true).await;
        assert_eq!(lists.online.len(), 2);
        let notch = lists.online.iter().find(|p| p.name == "Notch").unwrap();
        assert_eq!(notch.skin, "abc");
        assert_eq!(notch.status, Some(Presence::Online));
        let stranger = lists.online.iter().find(|p| p.name == "Stranger").unwrap();
        assert_eq!(stranger.skin, DEFAULT_SKIN);
    }

    #[tokio::test]
    async fn missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = ServerFiles::new(dir.path());

        let lists = files.players(true).await;
        assert!(lists.all.is_empty() && lists.online.is_empty());
        assert!(files.banned_players().await.is_empty());
        assert_eq!(files.player_data("Notch").await.unwrap(), None);
    }

    #[tokio::test]
    async fn player_data_refuses_path_like_names() {
        let (_dir, files) = server_with_players();
        assert!(files.player_data("../../usercache").await.is_err());
        assert!(files.player_data("Notch").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn kill_stats_by_uuid() {
        let dir = tempfile::tempdir().unwrap();
        let files = ServerFiles::new(dir.path());
        write_json(
            &files.dashboard_dir().join(KILLS_FILE),
            json!({ NOTCH: { "ZOMBIE": 12, "CREEPER": 3 } }),
        );

        let kills = files.kill_stats(NOTCH).await.unwrap().unwrap();
        assert_eq!(kills["ZOMBIE"], 12);
        assert_eq!(files.kill_stats(JEB).await.unwrap(), None);
    }

    #[tokio::test]
    async fn kill_stats_without_file_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = ServerFiles::new(dir.path());
        assert_eq!(files.kill_stats(NOTCH).await.unwrap(), None);
    }

    #[tokio::test]
    async fn bans_skip_malformed_entries() {
        let dir = tempfile::tempdir().unwrap();
        let files = ServerFiles::new(dir.path());
        write_json(
            &files.path(BANNED_PLAYERS),
            json!([{ "name": "griefer", "reason": "tnt" }, 42]),
        );

        let bans = files.banned_players().await;
        assert_eq!(bans.len(), 1);
        assert_eq!(bans[0].reason.as_deref(), Some("tnt"));
    }
}
