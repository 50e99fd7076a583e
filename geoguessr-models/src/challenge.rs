//! Challenge settings and their derived labels

use crate::ToTree;
use crate::convert::{to_bool, to_int, to_str};
use crate::map::Map;
use crate::profile::Profile;
use crate::tree::{TreeValue, TreeWriter};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Movement restrictions of a challenge or duel
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct MovementOptions {
    pub forbid_moving: Option<bool>,
    pub forbid_zooming: Option<bool>,
    pub forbid_rotating: Option<bool>,
}

impl MovementOptions {
    pub fn from_json(data: &Value) -> Self {
        Self {
            forbid_moving: to_bool(&data["forbidMoving"]),
            forbid_zooming: to_bool(&data["forbidZooming"]),
            forbid_rotating: to_bool(&data["forbidRotating"]),
        }
    }

    /// Game mode implied by the three restrictions
    pub fn game_mode(&self) -> GameMode {
        match (self.forbid_moving, self.forbid_rotating, self.forbid_zooming) {
            (Some(forbid_moving), Some(forbid_rotating), Some(forbid_zooming)) => {
                GameMode::from_flags(!forbid_moving, !forbid_rotating, !forbid_zooming)
            }
            _ => GameMode::Unknown,
        }
    }
}

/// Game mode label derived from the move, pan and zoom permissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum GameMode {
    #[serde(rename = "Move")]
    Move,
    #[serde(rename = "No Move")]
    NoMove,
    #[serde(rename = "NMPZ")]
    Nmpz,
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl GameMode {
    /// Classify a permission triple; combinations outside the three named modes
    /// are `Unknown`
    pub fn from_flags(can_move: bool, can_pan: bool, can_zoom: bool) -> Self {
        match (can_move, can_pan, can_zoom) {
            (true, true, true) => GameMode::Move,
            (false, true, true) => GameMode::NoMove,
            (false, false, false) => GameMode::Nmpz,
            _ => GameMode::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Move => "Move",
            GameMode::NoMove => "No Move",
            GameMode::Nmpz => "NMPZ",
            GameMode::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TreeValue for GameMode {
    fn write_value(&self, name: &str, out: &mut TreeWriter) {
        out.leaf(name, "GameMode", self);
    }
}

/// Human-readable rendering of a time limit in seconds
///
/// `0` is "No time limit". Otherwise minutes and seconds are rendered as
/// `<m> min` and `<s> sec`, a zero part is left out: `125` gives "2 min 5 sec",
/// `60` gives "1 min", `45` gives "45 sec". Negative limits are rendered on their
/// absolute value.
pub fn describe_time_limit(seconds: i64) -> String {
    if seconds == 0 {
        return "No time limit".to_string();
    }

    let total = seconds.unsigned_abs();
    let (minutes, seconds) = (total / 60, total % 60);
    let mut parts = Vec::with_capacity(2);
    if minutes != 0 {
        parts.push(format!("{minutes} min"));
    }
    if seconds != 0 {
        parts.push(format!("{seconds} sec"));
    }
    parts.join(" ")
}

/// Settings of a challenge, from the `challenge` object of `/api/v3/challenges/{token}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub token: Option<String>,
    pub map_slug: Option<String>,
    pub round_count: Option<i64>,
    /// Time limit per round, in seconds
    pub time_limit: Option<i64>,
    pub time_limit_label: Option<String>,
    pub movement_options: MovementOptions,
    pub game_mode: GameMode,
    /// Mode name as reported by the API (`Standard`, `Streak`, ...)
    pub api_game_mode: Option<String>,
    pub guess_map_type: Option<String>,
    pub number_of_participants: Option<i64>,
    pub challenge_type: Option<i64>,
    pub streak_type: Option<String>,
    pub access_level: Option<i64>,
    pub location_order: Option<i64>,
}

impl Challenge {
    pub fn from_json(data: &Value) -> Self {
        let time_limit = to_int(&data["timeLimit"]);
        let movement_options = MovementOptions::from_json(data);
        let game_mode = movement_options.game_mode();

        Self {
            token: to_str(&data["token"]),
            map_slug: to_str(&data["mapSlug"]),
            round_count: to_int(&data["roundCount"]),
            time_limit,
            time_limit_label: time_limit.map(describe_time_limit),
            movement_options,
            game_mode,
            api_game_mode: to_str(&data["gameMode"]),
            guess_map_type: to_str(&data["guessMapType"]),
            number_of_participants: to_int(&data["numberOfParticipants"]),
            challenge_type: to_int(&data["challengeType"]),
            streak_type: to_str(&data["streakType"]),
            access_level: to_int(&data["accessLevel"]),
            location_order: to_int(&data["locationOrder"]),
        }
    }
}

/// A challenge together with its map and creator
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeInfo {
    pub challenge: Challenge,
    pub map: Option<Map>,
    pub creator: Option<Profile>,
}

impl ChallengeInfo {
    pub fn from_json(data: &Value) -> Self {
        Self {
            challenge: Challenge::from_json(&data["challenge"]),
            map: data["map"].is_object().then(|| Map::from_json(&data["map"])),
            creator: data["creator"]
                .is_object()
                .then(|| Profile::from_json(&data["creator"])),
        }
    }
}
