//! Per-game-mode statistics from `/api/v4/stats/users/{id}`

use crate::ToTree;
use crate::convert::{to_float, to_int};
use crate::profile::{Level, XpTitle};
use serde::Serialize;
use serde_json::Value;

/// Games, wins and win ratio of a team mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct TeamDuelRecord {
    pub num_games_played: Option<i64>,
    pub num_wins: Option<i64>,
    pub win_ratio: Option<f64>,
}

impl TeamDuelRecord {
    pub fn from_json(data: &Value) -> Self {
        Self {
            num_games_played: to_int(&data["numGamesPlayed"]),
            num_wins: to_int(&data["numWins"]),
            win_ratio: to_float(&data["winRatio"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct QuickplayRecord {
    pub num_games_played: Option<i64>,
    pub num_wins: Option<i64>,
}

impl QuickplayRecord {
    pub fn from_json(data: &Value) -> Self {
        Self {
            num_games_played: to_int(&data["numGamesPlayed"]),
            num_wins: to_int(&data["numWins"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct BattleRoyaleDistanceStats {
    pub num_games_played: Option<i64>,
    pub avg_position: Option<f64>,
    pub num_wins: Option<i64>,
    pub win_ratio: Option<f64>,
    pub avg_guess_distance: Option<f64>,
    pub num_guesses: Option<i64>,
}

impl BattleRoyaleDistanceStats {
    pub fn from_json(data: &Value) -> Self {
        Self {
            num_games_played: to_int(&data["numGamesPlayed"]),
            avg_position: to_float(&data["avgPosition"]),
            num_wins: to_int(&data["numWins"]),
            win_ratio: to_float(&data["winRatio"]),
            avg_guess_distance: to_float(&data["avgGuessDistance"]),
            num_guesses: to_int(&data["numGuesses"]),
        }
    }
}

/// Stats of the modes scored by correct guesses (battle royale countries, city streaks)
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct GuessingModeStats {
    pub num_games_played: Option<i64>,
    pub avg_position: Option<f64>,
    pub num_wins: Option<i64>,
    pub win_ratio: Option<f64>,
    pub num_guesses: Option<i64>,
    pub avg_correct_guesses: Option<f64>,
}

impl GuessingModeStats {
    pub fn from_json(data: &Value) -> Self {
        Self {
            num_games_played: to_int(&data["numGamesPlayed"]),
            avg_position: to_float(&data["avgPosition"]),
            num_wins: to_int(&data["numWins"]),
            win_ratio: to_float(&data["winRatio"]),
            num_guesses: to_int(&data["numGuesses"]),
            avg_correct_guesses: to_float(&data["avgCorrectGuesses"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct MedalCount {
    pub gold: Option<i64>,
    pub silver: Option<i64>,
    pub bronze: Option<i64>,
}

impl MedalCount {
    pub fn from_json(data: &Value) -> Self {
        Self {
            gold: to_int(&data["medalCountGold"]),
            silver: to_int(&data["medalCountSilver"]),
            bronze: to_int(&data["medalCountBronze"]),
        }
    }
}

/// Stats of one duel variant, ranked or unranked
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelStats {
    pub num_games_played: Option<i64>,
    pub avg_position: Option<f64>,
    pub num_wins: Option<i64>,
    pub win_ratio: Option<f64>,
    pub avg_guess_distance: Option<f64>,
    pub num_guesses: Option<i64>,
    pub num_flawless_wins: Option<i64>,
}

impl DuelStats {
    pub fn from_json(data: &Value) -> Self {
        Self {
            num_games_played: to_int(&data["numGamesPlayed"]),
            avg_position: to_float(&data["avgPosition"]),
            num_wins: to_int(&data["numWins"]),
            win_ratio: to_float(&data["winRatio"]),
            avg_guess_distance: to_float(&data["avgGuessDistance"]),
            num_guesses: to_int(&data["numGuesses"]),
            num_flawless_wins: to_int(&data["numFlawlessWins"]),
        }
    }
}

/// XP snapshot with the surrounding levels and the current title
///
/// Shared by the lifetime stats block and by duel progress changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct XpProgression {
    pub xp: Option<i64>,
    pub current_level: Level,
    pub next_level: Level,
    pub current_title: XpTitle,
}

impl XpProgression {
    pub fn from_json(data: &Value) -> Self {
        Self {
            xp: to_int(&data["xp"]),
            current_level: Level::from_json(&data["currentLevel"]),
            next_level: Level::from_json(&data["nextLevel"]),
            current_title: XpTitle::from_json(&data["currentTitle"]),
        }
    }
}

/// Number of party games played per mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct PartyStats {
    pub total: Option<i64>,
    pub duels: Option<i64>,
    pub team_duels: Option<i64>,
    pub battle_royale_countries: Option<i64>,
    pub battle_royale_distance: Option<i64>,
    pub city_streaks: Option<i64>,
    pub live_challenges: Option<i64>,
    pub bullseye: Option<i64>,
    pub quizzes: Option<i64>,
}

impl PartyStats {
    pub fn from_json(data: &Value) -> Self {
        Self {
            total: to_int(&data["total"]),
            duels: to_int(&data["duels"]),
            team_duels: to_int(&data["teamDuels"]),
            battle_royale_countries: to_int(&data["battleRoyaleCountries"]),
            battle_royale_distance: to_int(&data["battleRoyaleDistance"]),
            city_streaks: to_int(&data["cityStreaks"]),
            live_challenges: to_int(&data["liveChallenges"]),
            bullseye: to_int(&data["bullseye"]),
            quizzes: to_int(&data["quizzes"]),
        }
    }
}

/// The full stats catalogue of a user
///
/// Each block is built independently; a block missing from the response leaves
/// every one of its fields `None` without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub ranked_team_duels_standard: TeamDuelRecord,
    pub ranked_team_duels_no_move: TeamDuelRecord,
    pub ranked_team_duels_nmpz: TeamDuelRecord,
    pub ranked_team_duels_total: TeamDuelRecord,

    pub battle_royale_distance: BattleRoyaleDistanceStats,
    pub battle_royale_country: GuessingModeStats,
    pub battle_royale_medals: MedalCount,

    pub competitive_city_streaks: GuessingModeStats,
    pub competitive_streaks_medals: MedalCount,

    pub duels: DuelStats,
    pub duels_no_move: DuelStats,
    pub duels_nmpz: DuelStats,
    pub duels_total: DuelStats,
    pub duels_medals: MedalCount,

    pub unranked_duels: DuelStats,
    pub unranked_duels_no_move: DuelStats,
    pub unranked_duels_nmpz: DuelStats,
    pub unranked_duels_total: DuelStats,

    pub life_time_xp_progression: XpProgression,
    pub total_medals: MedalCount,
    pub team_duels: TeamDuelRecord,
    pub team_duels_quickplay: QuickplayRecord,
    pub party: PartyStats,

    pub quickplay_flawless_victories: Option<i64>,
    pub perfect_rounds: Option<i64>,
}

impl Stats {
    pub fn from_json(data: &Value) -> Self {
        Self {
            ranked_team_duels_standard: TeamDuelRecord::from_json(&data["rankedTeamDuelsStandard"]),
            ranked_team_duels_no_move: TeamDuelRecord::from_json(&data["rankedTeamDuelsNoMove"]),
            ranked_team_duels_nmpz: TeamDuelRecord::from_json(&data["rankedTeamDuelsNmpz"]),
            ranked_team_duels_total: TeamDuelRecord::from_json(&data["rankedTeamDuelsTotal"]),

            battle_royale_distance: BattleRoyaleDistanceStats::from_json(&data["battleRoyaleDistance"]),
            battle_royale_country: GuessingModeStats::from_json(&data["battleRoyaleCountry"]),
            battle_royale_medals: MedalCount::from_json(&data["battleRoyaleMedals"]),

            competitive_city_streaks: GuessingModeStats::from_json(&data["competitiveCityStreaks"]),
            competitive_streaks_medals: MedalCount::from_json(&data["competitiveStreaksMedals"]),

            duels: DuelStats::from_json(&data["duels"]),
            duels_no_move: DuelStats::from_json(&data["duelsNoMove"]),
            duels_nmpz: DuelStats::from_json(&data["duelsNmpz"]),
            duels_total: DuelStats::from_json(&data["duelsTotal"]),
            duels_medals: MedalCount::from_json(&data["duelsMedals"]),

            unranked_duels: DuelStats::from_json(&data["unrankedDuels"]),
            unranked_duels_no_move: DuelStats::from_json(&data["unrankedDuelsNoMove"]),
            unranked_duels_nmpz: DuelStats::from_json(&data["unrankedDuelsNmpz"]),
            unranked_duels_total: DuelStats::from_json(&data["unrankedDuelsTotal"]),

            life_time_xp_progression: XpProgression::from_json(&data["lifeTimeXpProgression"]),
            total_medals: MedalCount::from_json(&data["totalMedals"]),
            team_duels: TeamDuelRecord::from_json(&data["teamDuels"]),
            team_duels_quickplay: QuickplayRecord::from_json(&data["teamDuelsQuickplay"]),
            party: PartyStats::from_json(&data["party"]),

            quickplay_flawless_victories: to_int(&data["quickplayFlawlessVictories"]),
            perfect_rounds: to_int(&data["perfectRounds"]),
        }
    }
}
