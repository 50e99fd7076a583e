//! Private activity feed

use crate::ToTree;
use crate::convert::{non_null_items, to_int, to_str, to_timestamp};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

/// Feed entry type of a single ranked game
const SINGLE_GAME_ENTRY: i64 = 6;
/// Feed entry type grouping several games
const GROUPED_ENTRY: i64 = 7;
const DUELS_GAME_MODE: &str = "Duels";

/// Layout of [`RankedDuel::formatted_time`]
pub const ACTIVITY_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Raw entries of the activity feed, in feed order
///
/// Entries are kept as JSON: their payload shape depends on the entry type and is
/// only interpreted by queries such as [`Activities::ranked_duels`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Activities {
    pub entries: Vec<Value>,
}

/// A ranked duel found in the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct RankedDuel {
    pub played_at: Option<NaiveDateTime>,
    pub game_id: String,
}

impl RankedDuel {
    pub fn formatted_time(&self) -> Option<String> {
        self.played_at
            .map(|time| time.format(ACTIVITY_TIME_FORMAT).to_string())
    }
}

impl Activities {
    pub fn from_entries(entries: Vec<Value>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every ranked duel of the feed, in feed order
    ///
    /// A ranked duel is an entry of type 6 whose payload has `gameMode == "Duels"`,
    /// or such an entry nested in the payload list of a type 7 entry. Payloads may
    /// be JSON-encoded strings.
    pub fn ranked_duels(&self) -> Vec<RankedDuel> {
        let mut duels = Vec::new();
        for entry in non_null_items_of(&self.entries) {
            let Some(payload) = decode_payload(&entry["payload"]) else {
                continue;
            };
            match to_int(&entry["type"]) {
                Some(SINGLE_GAME_ENTRY) => duels.extend(ranked_duel(entry, &payload)),
                Some(GROUPED_ENTRY) => {
                    for game in non_null_items(&payload) {
                        if to_int(&game["type"]) != Some(SINGLE_GAME_ENTRY) {
                            continue;
                        }
                        if let Some(nested) = decode_payload(&game["payload"]) {
                            duels.extend(ranked_duel(game, &nested));
                        }
                    }
                }
                _ => {}
            }
        }
        duels
    }
}

fn non_null_items_of(entries: &[Value]) -> impl Iterator<Item = &Value> {
    entries.iter().filter(|entry| !entry.is_null())
}

fn decode_payload(payload: &Value) -> Option<Cow<'_, Value>> {
    match payload {
        Value::Null => None,
        Value::String(raw) => serde_json::from_str(raw).ok().map(Cow::Owned),
        other => Some(Cow::Borrowed(other)),
    }
}

fn ranked_duel(entry: &Value, payload: &Value) -> Option<RankedDuel> {
    if payload["gameMode"].as_str() != Some(DUELS_GAME_MODE) {
        return None;
    }
    Some(RankedDuel {
        played_at: to_timestamp(&entry["time"]),
        game_id: to_str(&payload["gameId"])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ranked_duels_from_single_and_grouped_entries() {
        let activities = Activities::from_entries(vec![
            json!({
                "type": 6,
                "time": "2024-05-01T18:30:12.345Z",
                "payload": "{\"gameId\":\"d1\",\"gameMode\":\"Duels\"}"
            }),
            json!({
                "type": 6,
                "time": "2024-05-01T19:00:00Z",
                "payload": "{\"gameId\":\"br1\",\"gameMode\":\"BattleRoyaleCountries\"}"
            }),
            json!({
                "type": 7,
                "time": "2024-05-02T08:00:00Z",
                "payload": "[{\"type\":6,\"time\":\"2024-05-02T07:00:00Z\",\"payload\":{\"gameId\":\"d2\",\"gameMode\":\"Duels\"}},{\"type\":2,\"payload\":{\"mapSlug\":\"world\"}}]"
            }),
            json!({"type": 1, "payload": "{\"mapSlug\":\"world\"}"}),
            json!({"type": 6}),
            Value::Null,
        ]);

        let duels = activities.ranked_duels();
        assert_eq!(duels.len(), 2);
        assert_eq!(duels[0].game_id, "d1");
        assert_eq!(duels[0].formatted_time().as_deref(), Some("01-05-2024 18:30:12"));
        assert_eq!(duels[1].game_id, "d2");
        assert_eq!(duels[1].formatted_time().as_deref(), Some("02-05-2024 07:00:00"));
    }

    #[test]
    fn test_object_payloads_and_garbage_strings() {
        let activities = Activities::from_entries(vec![
            json!({"type": 6, "time": "2024-05-01T18:30:12", "payload": {"gameId": "d3", "gameMode": "Duels"}}),
            json!({"type": 6, "payload": "not json"}),
        ]);
        let duels = activities.ranked_duels();
        assert_eq!(duels.len(), 1);
        assert_eq!(duels[0].game_id, "d3");
        assert_eq!(activities.len(), 2);
    }

    #[test]
    fn test_empty_feed() {
        assert!(Activities::default().ranked_duels().is_empty());
        assert!(Activities::default().is_empty());
    }
}
