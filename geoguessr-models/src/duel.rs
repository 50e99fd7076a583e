//! Duels from the game server
//!
//! Coordinates, distances and panorama angles may arrive as plain numbers or as
//! tagged Big Number objects; both go through [`big_number_or_numeric`] and read
//! as `0.0` when they are neither.

use crate::ToTree;
use crate::challenge::MovementOptions;
use crate::convert::{big_number_or_numeric, non_null, non_null_items, to_bool, to_float, to_int, to_str, to_timestamp};
use crate::replay::DuelReplay;
use crate::stats::XpProgression;
use crate::tree::{TreeValue, TreeWriter};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::ops::RangeInclusive;

/// A guess of a duel player
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelGuess {
    pub round_number: Option<i64>,
    pub lat: f64,
    pub lng: f64,
    pub distance: f64,
    pub created: Option<NaiveDateTime>,
    pub is_teams_best_guess_on_round: Option<bool>,
    pub score: Option<i64>,
}

impl DuelGuess {
    pub fn from_json(data: &Value) -> Self {
        Self {
            round_number: to_int(&data["roundNumber"]),
            lat: big_number_or_numeric(&data["lat"]),
            lng: big_number_or_numeric(&data["lng"]),
            distance: big_number_or_numeric(&data["distance"]),
            created: to_timestamp(&data["created"]),
            is_teams_best_guess_on_round: to_bool(&data["isTeamsBestGuessOnRound"]),
            score: to_int(&data["score"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct XpAward {
    pub xp: Option<i64>,
    pub reason: Option<String>,
    pub count: Option<i64>,
}

impl XpAward {
    pub fn from_json(data: &Value) -> Self {
        Self {
            xp: to_int(&data["xp"]),
            reason: to_str(&data["reason"]),
            count: to_int(&data["count"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct AwardedXp {
    pub total_awarded_xp: Option<i64>,
    pub xp_awards: Vec<XpAward>,
}

impl AwardedXp {
    pub fn from_json(data: &Value) -> Self {
        Self {
            total_awarded_xp: to_int(&data["totalAwardedXp"]),
            xp_awards: non_null_items(&data["xpAwards"]).map(XpAward::from_json).collect(),
        }
    }
}

/// Ranked rating and weekly points movement caused by the duel
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct RankedSystemProgress {
    pub points: Option<Value>,
    pub total_weekly_points: Option<i64>,
    pub weekly_cap: Option<i64>,
    pub games_played_within_weekly_cap: Option<i64>,
    pub position_before: Option<i64>,
    pub position_after: Option<i64>,
    pub rating_before: Option<i64>,
    pub rating_after: Option<i64>,
    pub win_streak: Option<i64>,
    pub bucket_sorted_by: Option<String>,
    pub game_mode: Option<String>,
    pub game_mode_rating_before: Option<i64>,
    pub game_mode_rating_after: Option<i64>,
    pub game_mode_games_played: Option<i64>,
    pub game_mode_games_required: Option<i64>,
    pub placement_games_played: Option<i64>,
    pub placement_games_required: Option<i64>,
}

impl RankedSystemProgress {
    pub fn from_json(data: &Value) -> Self {
        Self {
            points: non_null(&data["points"]),
            total_weekly_points: to_int(&data["totalWeeklyPoints"]),
            weekly_cap: to_int(&data["weeklyCap"]),
            games_played_within_weekly_cap: to_int(&data["gamesPlayedWithinWeeklyCap"]),
            position_before: to_int(&data["positionBefore"]),
            position_after: to_int(&data["positionAfter"]),
            rating_before: to_int(&data["ratingBefore"]),
            rating_after: to_int(&data["ratingAfter"]),
            win_streak: to_int(&data["winStreak"]),
            bucket_sorted_by: to_str(&data["bucketSortedBy"]),
            game_mode: to_str(&data["gameMode"]),
            game_mode_rating_before: to_int(&data["gameModeRatingBefore"]),
            game_mode_rating_after: to_int(&data["gameModeRatingAfter"]),
            game_mode_games_played: to_int(&data["gameModeGamesPlayed"]),
            game_mode_games_required: to_int(&data["gameModeGamesRequired"]),
            placement_games_played: to_int(&data["placementGamesPlayed"]),
            placement_games_required: to_int(&data["placementGamesRequired"]),
        }
    }
}

/// XP, medal and rating changes of a player over the duel
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct ProgressChange {
    pub xp_at_start: Option<XpProgression>,
    pub xp_at_end: Option<XpProgression>,
    pub awarded_xp: AwardedXp,
    pub medal: Option<String>,
    pub competitive_progress: Option<Value>,
    pub ranked_system_progress: RankedSystemProgress,
    pub ranked_team_duels_progress: Option<Value>,
    pub quickplay_duels_progress: Option<Value>,
}

impl ProgressChange {
    pub fn from_json(data: &Value) -> Self {
        let progressions = &data["xpProgressions"];
        Self {
            xp_at_start: progressions.get(0).map(XpProgression::from_json),
            xp_at_end: progressions.get(1).map(XpProgression::from_json),
            awarded_xp: AwardedXp::from_json(&data["awardedXp"]),
            medal: to_str(&data["medal"]),
            competitive_progress: non_null(&data["competitiveProgress"]),
            ranked_system_progress: RankedSystemProgress::from_json(&data["rankedSystemProgress"]),
            ranked_team_duels_progress: non_null(&data["rankedTeamDuelsProgress"]),
            quickplay_duels_progress: non_null(&data["quickplayDuelsProgress"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelPlayer {
    pub player_id: Option<String>,
    pub guesses: Vec<DuelGuess>,
    pub rating: Option<i64>,
    pub country_code: Option<String>,
    pub progress_change: ProgressChange,
    pub help_requested: Option<bool>,
    pub is_steam: Option<bool>,
}

impl DuelPlayer {
    pub fn from_json(data: &Value) -> Self {
        Self {
            player_id: to_str(&data["playerId"]),
            guesses: non_null_items(&data["guesses"]).map(DuelGuess::from_json).collect(),
            rating: to_int(&data["rating"]),
            country_code: to_str(&data["countryCode"]),
            progress_change: ProgressChange::from_json(&data["progressChange"]),
            help_requested: to_bool(&data["helpRequested"]),
            is_steam: to_bool(&data["isSteam"]),
        }
    }
}

/// Outcome of one round for one team
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoundResult {
    pub round_number: Option<i64>,
    pub score: Option<i64>,
    pub health_before: Option<i64>,
    pub health_after: Option<i64>,
    pub best_guess: DuelGuess,
    pub active_multiplier: Option<bool>,
    pub damage_dealt: Option<i64>,
    pub multiplier: Option<f64>,
}

impl TeamRoundResult {
    pub fn from_json(data: &Value) -> Self {
        Self {
            round_number: to_int(&data["roundNumber"]),
            score: to_int(&data["score"]),
            health_before: to_int(&data["healthBefore"]),
            health_after: to_int(&data["healthAfter"]),
            best_guess: DuelGuess::from_json(&data["bestGuess"]),
            active_multiplier: to_bool(&data["activeMultiplier"]),
            damage_dealt: to_int(&data["damageDealt"]),
            multiplier: to_float(&data["multiplier"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelTeam {
    pub id: Option<String>,
    pub name: Option<String>,
    pub health_at_end: Option<i64>,
    pub players: Vec<DuelPlayer>,
    pub round_results: Vec<TeamRoundResult>,
    pub is_multiplier_active: Option<bool>,
    pub multiplier_at_end: Option<f64>,
}

impl DuelTeam {
    pub fn from_json(data: &Value) -> Self {
        Self {
            id: to_str(&data["id"]),
            name: to_str(&data["name"]),
            health_at_end: to_int(&data["health"]),
            players: non_null_items(&data["players"]).map(DuelPlayer::from_json).collect(),
            round_results: non_null_items(&data["roundResults"])
                .map(TeamRoundResult::from_json)
                .collect(),
            is_multiplier_active: to_bool(&data["isMultiplierActive"]),
            multiplier_at_end: to_float(&data["currentMultiplier"]),
        }
    }
}

/// Street View location of a round
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Panorama {
    pub pano_id: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub country_code: Option<String>,
    pub heading: f64,
    pub pitch: f64,
    pub zoom: Option<i64>,
}

impl Panorama {
    pub fn from_json(data: &Value) -> Self {
        Self {
            pano_id: to_str(&data["panoId"]),
            lat: big_number_or_numeric(&data["lat"]),
            lng: big_number_or_numeric(&data["lng"]),
            country_code: to_str(&data["countryCode"]),
            heading: big_number_or_numeric(&data["heading"]),
            pitch: big_number_or_numeric(&data["pitch"]),
            zoom: to_int(&data["zoom"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelRound {
    pub round_number: Option<i64>,
    pub panorama: Panorama,
    pub has_processed_round_timeout: Option<bool>,
    pub is_healing_round: Option<bool>,
    pub multiplier: Option<f64>,
    pub damage_multiplier: Option<f64>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub timer_start_time: Option<NaiveDateTime>,
}

impl DuelRound {
    pub fn from_json(data: &Value) -> Self {
        Self {
            round_number: to_int(&data["roundNumber"]),
            panorama: Panorama::from_json(&data["panorama"]),
            has_processed_round_timeout: to_bool(&data["hasProcessedRoundTimeout"]),
            is_healing_round: to_bool(&data["isHealingRound"]),
            multiplier: to_float(&data["multiplier"]),
            damage_multiplier: to_float(&data["damageMultiplier"]),
            start_time: to_timestamp(&data["startTime"]),
            end_time: to_timestamp(&data["endTime"]),
            timer_start_time: to_timestamp(&data["timerStartTime"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn from_json(data: &Value) -> Self {
        Self {
            lat: big_number_or_numeric(&data["lat"]),
            lng: big_number_or_numeric(&data["lng"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct MapBounds {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl MapBounds {
    pub fn from_json(data: &Value) -> Self {
        Self {
            min: Coordinate::from_json(&data["min"]),
            max: Coordinate::from_json(&data["max"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelMap {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub bounds: MapBounds,
    pub max_error_distance: Option<i64>,
}

impl DuelMap {
    pub fn from_json(data: &Value) -> Self {
        Self {
            name: to_str(&data["name"]),
            slug: to_str(&data["slug"]),
            bounds: MapBounds::from_json(&data["bounds"]),
            max_error_distance: to_int(&data["maxErrorDistance"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct GameContext {
    pub context_type: Option<String>,
    pub id: Option<String>,
}

impl GameContext {
    pub fn from_json(data: &Value) -> Self {
        Self {
            context_type: to_str(&data["type"]),
            id: to_str(&data["id"]),
        }
    }
}

/// Rules the duel was played with
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelOptions {
    pub initial_health: Option<i64>,
    pub individual_initial_health: Option<bool>,
    pub initial_health_team_one: Option<i64>,
    pub initial_health_team_two: Option<i64>,
    pub round_time: Option<i64>,
    pub max_round_time: Option<i64>,
    pub grace_period_time: Option<i64>,
    pub game_time_out: Option<i64>,
    pub max_number_of_rounds: Option<i64>,
    pub healing_rounds: Vec<i64>,
    pub movement_options: MovementOptions,
    pub map_slug: Option<String>,
    pub is_rated: Option<bool>,
    pub map: DuelMap,
    pub duel_round_options: Option<Value>,
    pub rounds_without_damage_multiplier: Option<i64>,
    pub disable_multipliers: Option<bool>,
    pub multiplier_increment: Option<i64>,
    pub disable_healing: Option<bool>,
    pub is_team_duels: Option<bool>,
    pub game_context: GameContext,
    pub round_starting_behavior: Option<String>,
    pub flashback_rounds: Option<Value>,
    pub competitive_game_mode: Option<String>,
    pub count_all_guesses: Option<bool>,
    pub master_control_auto_start_rounds: Option<bool>,
    pub consumed_locations_identifier: Option<String>,
    pub use_curated_locations: Option<bool>,
    pub extra_wait_time_between_rounds: Option<i64>,
    pub round_countdown_delay: Option<i64>,
    pub guess_map_type: Option<String>,
    pub bot_behaviors: Option<Value>,
    pub active_multiplier: Option<bool>,
    pub round_win_multiplier_increment: Option<i64>,
}

impl DuelOptions {
    pub fn from_json(data: &Value) -> Self {
        Self {
            initial_health: to_int(&data["initialHealth"]),
            individual_initial_health: to_bool(&data["individualInitialHealth"]),
            initial_health_team_one: to_int(&data["initialHealthTeamOne"]),
            initial_health_team_two: to_int(&data["initialHealthTeamTwo"]),
            round_time: to_int(&data["roundTime"]),
            max_round_time: to_int(&data["maxRoundTime"]),
            grace_period_time: to_int(&data["gracePeriodTime"]),
            game_time_out: to_int(&data["gameTimeOut"]),
            max_number_of_rounds: to_int(&data["maxNumberOfRounds"]),
            healing_rounds: non_null_items(&data["healingRounds"]).filter_map(to_int).collect(),
            movement_options: MovementOptions::from_json(&data["movementOptions"]),
            map_slug: to_str(&data["mapSlug"]),
            is_rated: to_bool(&data["isRated"]),
            map: DuelMap::from_json(&data["map"]),
            duel_round_options: non_null(&data["duelRoundOptions"]),
            rounds_without_damage_multiplier: to_int(&data["roundsWithoutDamageMultiplier"]),
            disable_multipliers: to_bool(&data["disableMultipliers"]),
            multiplier_increment: to_int(&data["multiplierIncrement"]),
            disable_healing: to_bool(&data["disableHealing"]),
            is_team_duels: to_bool(&data["isTeamDuels"]),
            game_context: GameContext::from_json(&data["gameContext"]),
            round_starting_behavior: to_str(&data["roundStartingBehavior"]),
            flashback_rounds: non_null(&data["flashbackRounds"]),
            competitive_game_mode: to_str(&data["competitiveGameMode"]),
            count_all_guesses: to_bool(&data["countAllGuesses"]),
            master_control_auto_start_rounds: to_bool(&data["masterControlAutoStartRounds"]),
            consumed_locations_identifier: to_str(&data["consumedLocationsIdentifier"]),
            use_curated_locations: to_bool(&data["useCuratedLocations"]),
            extra_wait_time_between_rounds: to_int(&data["extraWaitTimeBetweenRounds"]),
            round_countdown_delay: to_int(&data["roundCountdownDelay"]),
            guess_map_type: to_str(&data["guessMapType"]),
            bot_behaviors: non_null(&data["botBehaviors"]),
            active_multiplier: to_bool(&data["activeMultiplier"]),
            round_win_multiplier_increment: to_int(&data["roundWinMultiplierIncrement"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelResult {
    pub is_draw: Option<bool>,
    pub winning_team_id: Option<String>,
    pub winner_style: Option<String>,
}

impl DuelResult {
    pub fn from_json(data: &Value) -> Self {
        Self {
            is_draw: to_bool(&data["isDraw"]),
            winning_team_id: to_str(&data["winningTeamId"]),
            winner_style: to_str(&data["winnerStyle"]),
        }
    }
}

/// Replays of each duel player, kept in team order
///
/// Serializes as a JSON object whose keys follow insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerReplays(Vec<(String, Vec<DuelReplay>)>);

impl PlayerReplays {
    /// Replays of `player_id`, if the player is part of the duel
    pub fn get(&self, player_id: &str) -> Option<&[DuelReplay]> {
        self.0
            .iter()
            .find(|(id, _)| id == player_id)
            .map(|(_, rounds)| rounds.as_slice())
    }

    /// Player ids in order
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DuelReplay])> {
        self.0.iter().map(|(id, rounds)| (id.as_str(), rounds.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<DuelReplay>)> for PlayerReplays {
    fn from_iter<I: IntoIterator<Item = (String, Vec<DuelReplay>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for PlayerReplays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, rounds)| (id, rounds)))
    }
}

impl TreeValue for PlayerReplays {
    fn write_value(&self, name: &str, out: &mut TreeWriter) {
        out.branch(name, "map", |out| {
            for (id, rounds) in &self.0 {
                rounds.write_value(&format!("{id:?}"), out);
            }
        });
    }
}

/// A duel from `/api/duels/{id}`
///
/// `replays` starts with one empty list per player, in team order, and is
/// filled through [`Duel::set_replays`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Duel {
    pub game_id: Option<String>,
    pub context: Option<Value>,
    pub teams: Vec<DuelTeam>,
    pub rounds: Vec<DuelRound>,
    /// Number of rounds actually played, read from `currentRoundNumber`
    pub total_round_count: Option<i64>,
    pub status: Option<String>,
    pub version: Option<i64>,
    pub options: DuelOptions,
    pub initial_health: Option<i64>,
    pub max_number_of_rounds: Option<i64>,
    pub result: DuelResult,
    pub is_paused: Option<bool>,
    pub game_server_node_id: Option<String>,
    pub tournament_id: Option<String>,
    #[tree(skip)]
    pub player_ids: Vec<String>,
    pub replays: PlayerReplays,
}

impl Duel {
    pub fn from_json(data: &Value) -> Self {
        let teams: Vec<DuelTeam> = non_null_items(&data["teams"]).map(DuelTeam::from_json).collect();
        let player_ids: Vec<String> = teams
            .iter()
            .flat_map(|team| &team.players)
            .filter_map(|player| player.player_id.clone())
            .collect();
        let replays = player_ids.iter().map(|id| (id.clone(), Vec::new())).collect();

        Self {
            game_id: to_str(&data["gameId"]),
            context: non_null(&data["context"]),
            teams,
            rounds: non_null_items(&data["rounds"]).map(DuelRound::from_json).collect(),
            total_round_count: to_int(&data["currentRoundNumber"]),
            status: to_str(&data["status"]),
            version: to_int(&data["version"]),
            options: DuelOptions::from_json(&data["options"]),
            initial_health: to_int(&data["initialHealth"]),
            max_number_of_rounds: to_int(&data["maxNumberOfRounds"]),
            result: DuelResult::from_json(&data["result"]),
            is_paused: to_bool(&data["isPaused"]),
            game_server_node_id: to_str(&data["gameServerNodeId"]),
            tournament_id: to_str(&data["tournamentId"]),
            player_ids,
            replays,
        }
    }

    /// Round numbers that have a replay, `1..=total_round_count`
    pub fn replay_rounds(&self) -> RangeInclusive<i64> {
        1..=self.total_round_count.unwrap_or(0)
    }

    /// Attach the replays fetched for each player
    pub fn set_replays(&mut self, replays: PlayerReplays) {
        self.replays = replays;
    }
}
