use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A console command argument the dashboard may send as a JSON string,
/// number or boolean. Always rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArg(String);

impl CommandArg {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for CommandArg {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandArg {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for CommandArg {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CommandArg {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(CommandArg(s)),
            Value::Number(n) => Ok(CommandArg(n.to_string())),
            Value::Bool(b) => Ok(CommandArg(b.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected a string, number or boolean, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommandRequest {
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertiesUpdateRequest {
    pub properties: Option<BTreeMap<String, CommandArg>>,
}

/// `POST /api/player/cmd/:name`, the command field is informational only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerCommandRequest {
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GiveRequest {
    pub item: Option<CommandArg>,
    pub amount: Option<CommandArg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceRequest {
    pub xp: Option<CommandArg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageRequest {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BanRequest {
    pub player_name: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnbanRequest {
    pub player_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeleportRequest {
    pub player: Option<CommandArg>,
    #[serde(rename = "X")]
    pub x: Option<CommandArg>,
    #[serde(rename = "Y")]
    pub y: Option<CommandArg>,
    #[serde(rename = "Z")]
    pub z: Option<CommandArg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemoveItemRequest {
    #[serde(rename = "Player")]
    pub player: Option<CommandArg>,
    #[serde(rename = "itemObj")]
    pub item: Option<CommandArg>,
    #[serde(rename = "Amt")]
    pub amount: Option<CommandArg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KillStatsRequest {
    pub uid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorldDeleteRequest {
    pub world: Option<String>,
}

/// `?lines=N`; anything unparsable falls back to the handler default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinesQuery {
    pub lines: Option<String>,
}

impl LinesQuery {
    pub fn lines_or(&self, default: usize) -> usize {
        self.lines
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(default)
    }
}
