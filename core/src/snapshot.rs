use crate::error::SnapshotError;
use crate::{League, Match, Team};
use serde::{Deserialize, Deserializer, Serialize};

/// Complete serializable state: what gets persisted and restored.
///
/// Decoding is lenient about what the store can recover from on its own: a
/// missing `teams` or `matches` field becomes an empty list, and a missing or
/// unrecognised `currentLeague` becomes the default league. Anything else
/// malformed is a [`SnapshotError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default, deserialize_with = "lenient_league")]
    pub current_league: League,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn lenient_league<'de, D>(deserializer: D) -> Result<League, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}
