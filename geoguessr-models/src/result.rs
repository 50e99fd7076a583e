//! Challenge leaderboard entries and their leaf value types

use crate::ToTree;
use crate::convert::{non_null_items, to_bool, to_float, to_int, to_str, to_timestamp};
use crate::error::ModelError;
use crate::profile::{Level, XpTitle};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_MILE: f64 = 1609.34;

/// One location of a challenge, numbered from 1
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRound {
    pub number: usize,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub pano_id: Option<String>,
    pub heading: Option<f64>,
    pub pitch: Option<f64>,
    pub zoom: Option<f64>,
    pub streak_location_code: Option<String>,
    pub start_time: Option<NaiveDateTime>,
}

impl ChallengeRound {
    pub fn from_json(data: &Value, number: usize) -> Self {
        Self {
            number,
            lat: to_float(&data["lat"]),
            lng: to_float(&data["lng"]),
            pano_id: to_str(&data["panoId"]),
            heading: to_float(&data["heading"]),
            pitch: to_float(&data["pitch"]),
            zoom: to_float(&data["zoom"]),
            streak_location_code: to_str(&data["streakLocationCode"]),
            start_time: to_timestamp(&data["startTime"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub percentage: Option<f64>,
}

impl Score {
    pub fn from_json(data: &Value) -> Self {
        Self {
            amount: to_float(&data["amount"]),
            unit: to_str(&data["unit"]),
            percentage: to_float(&data["percentage"]),
        }
    }
}

/// A distance, stored in meters
///
/// Built from `{"meters": {"amount": .., "unit": ..}}`. The API sometimes reports
/// the amount in kilometers under the `meters` key, tagged with unit `km`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Distance {
    pub meters: Option<f64>,
    pub kilometers: Option<f64>,
    pub miles: Option<f64>,
}

impl Distance {
    pub fn from_json(data: &Value) -> Self {
        let raw = &data["meters"];
        let scale = match raw["unit"].as_str() {
            Some("km") => METERS_PER_KILOMETER,
            _ => 1.0,
        };
        Self::from_meters(to_float(&raw["amount"]).map(|amount| amount * scale))
    }

    pub fn from_meters(meters: Option<f64>) -> Self {
        Self {
            meters,
            kilometers: meters.map(|m| m / METERS_PER_KILOMETER),
            miles: meters.map(|m| m / METERS_PER_MILE),
        }
    }
}

/// A duration, stored in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Time {
    pub seconds: Option<f64>,
    pub minutes: Option<f64>,
    pub hours: Option<f64>,
}

impl Time {
    /// Build from whichever unit is given, seconds first, then minutes, then hours
    pub fn new(seconds: Option<f64>, minutes: Option<f64>, hours: Option<f64>) -> Self {
        let seconds = seconds
            .or_else(|| minutes.map(|m| m * 60.0))
            .or_else(|| hours.map(|h| h * 3600.0));
        Self::from_seconds(seconds)
    }

    pub fn from_seconds(seconds: Option<f64>) -> Self {
        Self {
            seconds,
            minutes: seconds.map(|s| s / 60.0),
            hours: seconds.map(|s| s / 3600.0),
        }
    }
}

/// A player's guess for one round
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGuess {
    pub number: usize,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub timed_out: Option<bool>,
    pub timed_out_with_guess: Option<bool>,
    pub skipped_round: Option<bool>,
    pub round_score: Score,
    pub round_score_in_percentage: Option<i64>,
    pub round_score_in_points: Option<i64>,
    pub distance: Distance,
    pub distance_in_meters: Option<f64>,
    pub steps_count: Option<i64>,
    pub streak_location_code: Option<String>,
    pub time: Time,
}

impl PlayerGuess {
    pub fn from_json(data: &Value, number: usize) -> Self {
        Self {
            number,
            lat: to_float(&data["lat"]),
            lng: to_float(&data["lng"]),
            timed_out: to_bool(&data["timedOut"]),
            timed_out_with_guess: to_bool(&data["timedOutWithGuess"]),
            skipped_round: to_bool(&data["skippedRound"]),
            round_score: Score::from_json(&data["roundScore"]),
            round_score_in_percentage: to_int(&data["roundScoreInPercentage"]),
            round_score_in_points: to_int(&data["roundScoreInPoints"]),
            distance: Distance::from_json(&data["distance"]),
            distance_in_meters: to_float(&data["distanceInMeters"]),
            steps_count: to_int(&data["stepsCount"]),
            streak_location_code: to_str(&data["streakLocationCode"]),
            time: Time::from_seconds(to_float(&data["time"])),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct GameBounds {
    pub min_lat: Option<f64>,
    pub min_lng: Option<f64>,
    pub max_lat: Option<f64>,
    pub max_lng: Option<f64>,
}

impl GameBounds {
    pub fn from_json(data: &Value) -> Self {
        Self {
            min_lat: to_float(&data["min"]["lat"]),
            min_lng: to_float(&data["min"]["lng"]),
            max_lat: to_float(&data["max"]["lat"]),
            max_lng: to_float(&data["max"]["lng"]),
        }
    }
}

/// Identity of a leaderboard player and their XP progression over the challenge
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct ScorePlayerInfo {
    pub is_leader: Option<bool>,
    pub id: Option<String>,
    pub nick: Option<String>,
    pub is_verified: Option<bool>,
    pub flair: Option<i64>,
    pub country_code: Option<String>,
    pub pin_url: Option<String>,
    pub xp_before_challenge: Option<i64>,
    pub xp_after_challenge: Option<i64>,
    /// `None` unless both the before and after XP are known
    pub xp_gained: Option<i64>,
    pub level_before_challenge: Level,
    pub level_after_challenge: Level,
    pub title_before_challenge: XpTitle,
    pub title_after_challenge: XpTitle,
}

impl ScorePlayerInfo {
    /// Build from the `player` and `progressChange` objects of a result
    ///
    /// `progressChange.xpProgressions[0]` is the state before the challenge and
    /// `[1]` the state after. Missing entries read as empty objects.
    pub fn from_json(player: &Value, progress_change: &Value) -> Self {
        let progressions = &progress_change["xpProgressions"];
        let before = progressions.get(0).unwrap_or(&Value::Null);
        let after = progressions.get(1).unwrap_or(&Value::Null);

        let xp_before_challenge = to_int(&before["xp"]);
        let xp_after_challenge = to_int(&after["xp"]);
        let xp_gained = match (xp_before_challenge, xp_after_challenge) {
            (Some(before), Some(after)) => after.checked_sub(before),
            _ => None,
        };

        Self {
            is_leader: to_bool(&player["isLeader"]),
            id: to_str(&player["id"]),
            nick: to_str(&player["nick"]),
            is_verified: to_bool(&player["isVerified"]),
            flair: to_int(&player["flair"]),
            country_code: to_str(&player["countryCode"]),
            pin_url: to_str(&player["pin"]["url"]),
            xp_before_challenge,
            xp_after_challenge,
            xp_gained,
            level_before_challenge: Level::from_json(&before["currentLevel"]),
            level_after_challenge: Level::from_json(&after["currentLevel"]),
            title_before_challenge: XpTitle::from_json(&before["currentTitle"]),
            title_after_challenge: XpTitle::from_json(&after["currentTitle"]),
        }
    }
}

/// Totals of a player over the whole challenge, with every guess
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTotalResult {
    pub total_score: Score,
    pub total_distance: Distance,
    pub total_steps_count: Option<i64>,
    pub total_time: Time,
    pub total_streak: Option<i64>,
    pub guesses: Vec<PlayerGuess>,
}

impl PlayerTotalResult {
    pub fn from_json(player: &Value) -> Self {
        Self {
            total_score: Score::from_json(&player["totalScore"]),
            total_distance: Distance::from_json(&player["totalDistance"]),
            total_steps_count: to_int(&player["totalStepsCount"]),
            total_time: Time::from_seconds(to_float(&player["totalTime"])),
            total_streak: to_int(&player["totalStreak"]),
            guesses: non_null_items(&player["guesses"])
                .enumerate()
                .map(|(index, guess)| PlayerGuess::from_json(guess, index + 1))
                .collect(),
        }
    }
}

/// One leaderboard entry of a challenge
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResult {
    pub game_token: Option<String>,
    pub player: ScorePlayerInfo,
    pub game_type: Option<String>,
    pub mode: Option<String>,
    pub state: Option<String>,
    pub round_count: Option<i64>,
    pub streak_type: Option<String>,
    pub map: Option<String>,
    pub map_name: Option<String>,
    pub panorama_provider: Option<i64>,
    pub bounds: GameBounds,
    pub rounds: Vec<ChallengeRound>,
    pub player_total: PlayerTotalResult,
}

impl ChallengeResult {
    /// Build from a highscore item
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingData`] when the item has no `game` object.
    pub fn try_from_json(data: &Value) -> Result<Self, ModelError> {
        let game = &data["game"];
        if game.is_null() {
            return Err(ModelError::MissingData("game"));
        }
        let player = &game["player"];

        Ok(Self {
            game_token: to_str(&game["token"]),
            player: ScorePlayerInfo::from_json(player, &game["progressChange"]),
            game_type: to_str(&game["type"]),
            mode: to_str(&game["mode"]),
            state: to_str(&game["state"]),
            round_count: to_int(&game["roundCount"]),
            streak_type: to_str(&game["streakType"]),
            map: to_str(&game["map"]),
            map_name: to_str(&game["mapName"]),
            panorama_provider: to_int(&game["panoramaProvider"]),
            bounds: GameBounds::from_json(&game["bounds"]),
            rounds: non_null_items(&game["rounds"])
                .enumerate()
                .map(|(index, round)| ChallengeRound::from_json(round, index + 1))
                .collect(),
            player_total: PlayerTotalResult::from_json(player),
        })
    }
}

/// Every leaderboard entry of a challenge, in ranking order
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub results: Vec<ChallengeResult>,
}

impl Leaderboard {
    /// Build from the concatenated highscore items; null items are skipped and the
    /// first item without a `game` object fails the whole leaderboard
    pub fn try_from_items<'a, I>(items: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let results = items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(ChallengeResult::try_from_json)
            .collect::<Result<_, _>>()?;
        Ok(Self { results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample_item() -> Value {
        json!({
            "gameToken": "g1",
            "playerName": "alice",
            "game": {
                "token": "g1",
                "type": "challenge",
                "mode": "standard",
                "state": "finished",
                "roundCount": 5,
                "map": "world",
                "mapName": "World",
                "bounds": {"min": {"lat": -60, "lng": -180}, "max": {"lat": 80, "lng": 180}},
                "rounds": [
                    {"lat": 48.85, "lng": 2.35, "panoId": "p1", "startTime": "2024-01-01T10:00:00.500Z"},
                    null,
                    {"lat": "40.7", "lng": -74.0}
                ],
                "player": {
                    "id": "u1",
                    "nick": "alice",
                    "pin": {"url": "pin/a.png"},
                    "totalScore": {"amount": "23456", "unit": "points", "percentage": 93.8},
                    "totalDistance": {"meters": {"amount": "1523", "unit": "km"}},
                    "totalTime": 312,
                    "guesses": [
                        {"lat": 48.0, "lng": 2.0, "timedOut": false, "roundScoreInPoints": 4800,
                         "distance": {"meters": {"amount": "120", "unit": "m"}}, "time": 30},
                        {"lat": 40.0, "lng": -70.0, "timedOut": true, "time": 60}
                    ]
                },
                "progressChange": {
                    "xpProgressions": [
                        {"xp": 1000, "currentLevel": {"level": 10}, "currentTitle": {"name": "Rookie"}},
                        {"xp": 1250, "currentLevel": {"level": 11}, "currentTitle": {"name": "Rookie"}}
                    ]
                }
            }
        })
    }

    #[test]
    fn test_distance_in_kilometers_is_scaled() {
        let distance = Distance::from_json(&json!({"meters": {"amount": 1000, "unit": "km"}}));
        assert_eq!(distance.meters, Some(1_000_000.0));
        assert_eq!(distance.kilometers, Some(1000.0));
        let miles = distance.miles.unwrap();
        assert!((miles - 621.37).abs() < 0.01);
    }

    #[test]
    fn test_distance_in_meters_and_missing() {
        let distance = Distance::from_json(&json!({"meters": {"amount": "250", "unit": "m"}}));
        assert_eq!(distance.meters, Some(250.0));
        assert_eq!(distance.kilometers, Some(0.25));
        assert_eq!(Distance::from_json(&Value::Null), Distance::default());
    }

    #[test]
    fn test_time_first_present_unit_wins() {
        assert_eq!(Time::new(Some(90.0), Some(5.0), None).minutes, Some(1.5));
        assert_eq!(Time::new(None, Some(3.0), Some(9.0)).seconds, Some(180.0));
        assert_eq!(Time::new(None, None, Some(2.0)).seconds, Some(7200.0));
        assert_eq!(Time::new(None, None, None), Time::default());
    }

    #[test]
    fn test_challenge_result_fields() {
        let result = ChallengeResult::try_from_json(&sample_item()).unwrap();

        assert_eq!(result.game_token.as_deref(), Some("g1"));
        assert_eq!(result.player.nick.as_deref(), Some("alice"));
        assert_eq!(result.player.pin_url.as_deref(), Some("pin/a.png"));
        assert_eq!(result.player.xp_gained, Some(250));
        assert_eq!(result.player.level_after_challenge.level, Some(11));
        assert_eq!(result.bounds.max_lng, Some(180.0));
        assert_eq!(result.player_total.total_score.amount, Some(23456.0));
        assert_eq!(result.player_total.total_distance.meters, Some(1_523_000.0));
        assert_eq!(result.player_total.total_time.minutes, Some(5.2));
        assert_eq!(result.player_total.guesses.len(), 2);
        assert_eq!(result.player_total.guesses[0].distance.meters, Some(120.0));
        assert_eq!(result.player_total.guesses[1].timed_out, Some(true));
        assert_eq!(result.player_total.guesses[1].number, 2);
    }

    #[test]
    fn test_null_rounds_are_dropped_before_numbering() {
        let result = ChallengeResult::try_from_json(&sample_item()).unwrap();
        assert_eq!(result.rounds.len(), 2);
        assert_eq!(result.rounds[0].number, 1);
        assert_eq!(result.rounds[1].number, 2);
        assert_eq!(result.rounds[1].lat, Some(40.7));
        assert!(result.rounds[0].start_time.is_some());
        assert_eq!(result.rounds[1].start_time, None);
    }

    #[test]
    fn test_missing_game_is_an_error() {
        let err = ChallengeResult::try_from_json(&json!({"gameToken": "g1"})).unwrap_err();
        assert_eq!(err, ModelError::MissingData("game"));
    }

    #[test]
    fn test_xp_gained_needs_both_progressions() {
        let player = json!({"id": "u1"});
        let only_one = json!({"xpProgressions": [{"xp": 10}]});
        let info = ScorePlayerInfo::from_json(&player, &only_one);
        assert_eq!(info.xp_before_challenge, Some(10));
        assert_eq!(info.xp_after_challenge, None);
        assert_eq!(info.xp_gained, None);

        let info = ScorePlayerInfo::from_json(&player, &Value::Null);
        assert_eq!(info.xp_gained, None);
        assert_eq!(info.level_before_challenge, Level::default());
    }

    #[test]
    fn test_leaderboard_from_items() {
        let items = vec![sample_item(), Value::Null, sample_item()];
        let leaderboard = Leaderboard::try_from_items(&items).unwrap();
        assert_eq!(leaderboard.len(), 2);

        let items = vec![sample_item(), json!({"nope": 1})];
        assert_eq!(
            Leaderboard::try_from_items(&items).unwrap_err(),
            ModelError::MissingData("game")
        );
    }

    proptest! {
        #[test]
        fn prop_xp_gained_is_difference(before in -1_000_000i64..1_000_000, after in -1_000_000i64..1_000_000) {
            let progress = json!({"xpProgressions": [{"xp": before}, {"xp": after}]});
            let info = ScorePlayerInfo::from_json(&Value::Null, &progress);
            prop_assert_eq!(info.xp_gained, Some(after - before));
        }

        #[test]
        fn prop_distance_units_are_consistent(meters in 0.0f64..1.0e7) {
            let distance = Distance::from_json(&json!({"meters": {"amount": meters, "unit": "m"}}));
            let km = distance.kilometers.unwrap();
            let miles = distance.miles.unwrap();
            prop_assert!((km * 1000.0 - meters).abs() < 1e-6);
            prop_assert!((miles * 1609.34 - meters).abs() < 1e-6);
        }
    }
}
