use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Steve, used when the dashboard plugin has not stored a skin for a player.
pub const DEFAULT_SKIN: &str =
    "https://textures.minecraft.net/texture/389c99b3fc8c0bfc5bffcdf5936f3246c1ab82a14bb2b3bd0c1afbb57992f1a6";

/// An entry of the server's `usercache.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserCacheEntry {
    pub name: String,
    pub uuid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<String>,
}

/// An entry of the dashboard plugin's `online.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OnlineEntry {
    pub name: Option<String>,
    pub uuid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Online,
}

/// A player as shown in the dashboard's player list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<String>,
    pub skin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Presence>,
}

impl PlayerRecord {
    pub fn from_cache(entry: UserCacheEntry, skin: Option<String>) -> Self {
        Self {
            name: entry.name,
            uuid: entry.uuid.to_string(),
            expires_on: entry.expires_on,
            skin: skin.unwrap_or_else(|| DEFAULT_SKIN.to_string()),
            status: None,
        }
    }

    pub fn online(mut self) -> Self {
        self.status = Some(Presence::Online);
        self
    }
}

impl From<OnlineEntry> for PlayerRecord {
    fn from(entry: OnlineEntry) -> Self {
        Self {
            name: entry.name.unwrap_or_default(),
            uuid: entry.uuid.unwrap_or_default(),
            expires_on: None,
            skin: DEFAULT_SKIN.to_string(),
            status: Some(Presence::Online),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkinData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textures_base64: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthData {
    pub current: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HungerData {
    pub food_level: Option<f64>,
    pub saturation: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExperienceData {
    pub level: Option<i64>,
    pub total_experience: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionTime {
    pub total: Option<i64>,
    pub current: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Enchantment {
    pub id: Option<String>,
    pub lvl: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ItemStack {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxdurability: Option<i64>,
    pub enchantments: Vec<Enchantment>,
}

/// Snapshot written by the dashboard plugin to
/// `plugins/dashbordmc/playerdata/<name>.json`.
///
/// Every field is optional; keys the daemon does not know about are kept in
/// `extra` and handed back to the dashboard untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin: Option<SkinData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hunger: Option<HungerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_time: Option<SessionTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_hand: Option<ItemStack>,
    pub inventory: Vec<ItemStack>,
    pub armor: Vec<ItemStack>,
    pub statistics: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advancements: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerData {
    pub fn skin_texture(&self) -> Option<&str> {
        self.skin.as_ref()?.textures_base64.as_deref()
    }
}

/// Per-mob kill counters of one player, from `plugins/dashbordmc/kills.json`.
pub type KillStats = BTreeMap<String, u64>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn player_data_tolerates_missing_and_unknown_fields() {
        let raw = json!({
            "player": "Notch",
            "health": { "current": 17.5 },
            "inventory": [{ "slot": 0, "type": "DIAMOND_SWORD", "amount": 1 }],
            "locationc": { "x": 1, "y": 64, "z": -3, "world": "world" }
        });
        let data: PlayerData = serde_json::from_value(raw).unwrap();

        assert_eq!(data.player.as_deref(), Some("Notch"));
        assert_eq!(data.health.as_ref().and_then(|h| h.current), Some(17.5));
        assert_eq!(data.health.as_ref().and_then(|h| h.max), None);
        assert_eq!(data.inventory[0].item_type.as_deref(), Some("DIAMOND_SWORD"));
        assert!(data.inventory[0].enchantments.is_empty());
        assert!(data.armor.is_empty());
        assert_eq!(data.skin_texture(), None);
        assert_eq!(data.extra["locationc"]["y"], json!(64));

        // unknown keys survive a round trip back to the dashboard
        let back = serde_json::to_value(&data).unwrap();
        assert_eq!(back["locationc"]["world"], json!("world"));
        assert_eq!(back["inventory"][0]["type"], json!("DIAMOND_SWORD"));
    }

    #[test]
    fn online_entry_without_cache_match_gets_default_skin() {
        let entry: OnlineEntry =
            serde_json::from_value(json!({ "name": "Alex", "world": "world_nether" })).unwrap();
        let record = PlayerRecord::from(entry);
        assert_eq!(record.name, "Alex");
        assert_eq!(record.skin, DEFAULT_SKIN);
        assert_eq!(record.status, Some(Presence::Online));
    }
}
