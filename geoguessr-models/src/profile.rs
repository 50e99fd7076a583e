//! Player profiles and their progression blocks

use crate::ToTree;
use crate::convert::{non_null, non_null_items, to_bool, to_int, to_str, to_timestamp};
use crate::stats::Stats;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Medal counts shown on a profile's level badge
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionMedals {
    pub bronze: Option<i64>,
    pub silver: Option<i64>,
    pub gold: Option<i64>,
    pub platinum: Option<i64>,
}

impl CompetitionMedals {
    pub fn from_json(data: &Value) -> Self {
        Self {
            bronze: to_int(&data["bronze"]),
            silver: to_int(&data["silver"]),
            gold: to_int(&data["gold"]),
            platinum: to_int(&data["platinum"]),
        }
    }
}

/// Map pin and avatar cosmetics
///
/// Built from the profile root: the pin itself is nested under `pin`, the other
/// cosmetics sit next to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub url: Option<String>,
    pub anchor: Option<String>,
    pub is_default: Option<bool>,
    pub custom_image: Option<String>,
    pub full_body: Option<String>,
    pub border_url: Option<String>,
}

impl Pin {
    pub fn from_json(profile: &Value) -> Self {
        Self {
            url: to_str(&profile["pin"]["url"]),
            anchor: to_str(&profile["pin"]["anchor"]),
            is_default: to_bool(&profile["pin"]["isDefault"]),
            custom_image: to_str(&profile["customImage"]),
            full_body: to_str(&profile["fullBodyPin"]),
            border_url: to_str(&profile["borderUrl"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub division_type: Option<i64>,
    pub start_rating: Option<i64>,
    pub end_rating: Option<i64>,
}

impl Division {
    pub fn from_json(data: &Value) -> Self {
        Self {
            division_type: to_int(&data["type"]),
            start_rating: to_int(&data["startRating"]),
            end_rating: to_int(&data["endRating"]),
        }
    }
}

/// Legacy competitive rating block, only present on older accounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Competitive {
    pub elo: Option<i64>,
    pub rating: Option<i64>,
    pub last_rating_change: Option<i64>,
    pub division: Division,
    pub on_leaderboard: Option<bool>,
}

impl Competitive {
    pub fn from_json(data: &Value) -> Self {
        Self {
            elo: to_int(&data["elo"]),
            rating: to_int(&data["rating"]),
            last_rating_change: to_int(&data["lastRatingChange"]),
            division: Division::from_json(&data["division"]),
            on_leaderboard: to_bool(&data["onLeaderboard"]),
        }
    }
}

/// A level and the XP at which it starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub level: Option<i64>,
    pub xp_start: Option<i64>,
}

impl Level {
    pub fn from_json(data: &Value) -> Self {
        Self {
            level: to_int(&data["level"]),
            xp_start: to_int(&data["xpStart"]),
        }
    }
}

/// Title unlocked at a given level
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct XpTitle {
    pub id: Option<i64>,
    pub tier_id: Option<i64>,
    pub minimum_level: Option<i64>,
    pub name: Option<String>,
}

impl XpTitle {
    pub fn from_json(data: &Value) -> Self {
        Self {
            id: to_int(&data["id"]),
            tier_id: to_int(&data["tierId"]),
            minimum_level: to_int(&data["minimumLevel"]),
            name: to_str(&data["name"]),
        }
    }
}

/// Level, XP and title progression of a profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: Option<i64>,
    pub xp: Option<i64>,
    /// XP at which the current level started
    pub level_xp_start: Option<i64>,
    pub next_level_xp: Option<i64>,
    pub next_level: Option<i64>,
    pub title: XpTitle,
    pub competition_medals: CompetitionMedals,
}

impl LevelProgress {
    pub fn from_json(data: &Value) -> Self {
        Self {
            level: to_int(&data["level"]),
            xp: to_int(&data["xp"]),
            level_xp_start: to_int(&data["levelXp"]),
            next_level_xp: to_int(&data["nextLevelXp"]),
            next_level: to_int(&data["nextLevel"]),
            title: XpTitle::from_json(&data["title"]),
            competition_medals: CompetitionMedals::from_json(&data["competitionMedals"]),
        }
    }
}

/// A GeoGuessr user profile
///
/// Built from `/api/v3/users/{id}`. Every field is optional: the endpoint omits
/// whatever does not apply to the account. `stats` is attached afterwards through
/// [`Profile::set_stats`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Opaque user id, never an empty string
    pub id: Option<String>,
    pub nick: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub is_pro_user: Option<bool>,
    pub user_type: Option<String>,
    pub is_verified: Option<bool>,
    pub pin: Pin,
    pub color: Option<i64>,
    pub url: Option<String>,
    pub country_code: Option<String>,
    pub battle_royale_level: Option<i64>,
    pub battle_royale_division: Option<i64>,
    pub streak_progress: Option<Value>,
    pub explorer_progress: Option<Value>,
    pub daily_challenge_progress: Option<i64>,
    pub progress: LevelProgress,
    pub competitive: Option<Competitive>,
    pub last_name_change: Option<NaiveDateTime>,
    pub last_nick_or_country_change: Option<NaiveDateTime>,
    pub is_banned: Option<bool>,
    pub chat_ban: Option<bool>,
    pub name_change_available_at: Option<NaiveDateTime>,
    pub avatar_url: Option<String>,
    pub is_bot_user: Option<bool>,
    pub suspended_until: Option<NaiveDateTime>,
    pub wallet: Option<i64>,
    pub flair: Option<i64>,
    pub is_creator: Option<bool>,
    pub is_app_anonymous: Option<bool>,
    pub steam_user_type: Option<i64>,
    pub stats: Option<Stats>,
}

impl Profile {
    pub fn from_json(data: &Value) -> Self {
        let competitive = data["competitive"]
            .as_object()
            .filter(|block| !block.is_empty())
            .map(|_| Competitive::from_json(&data["competitive"]));

        let avatar = &data["avatar"];
        let avatar_url =
            to_str(&avatar["fullBodyPath"]).or_else(|| to_str(&avatar["fullbodypath"]));

        Self {
            id: to_str(&data["id"]).filter(|id| !id.is_empty()),
            nick: to_str(&data["nick"]),
            created_at: to_timestamp(&data["created"]),
            is_pro_user: to_bool(&data["isProUser"]),
            user_type: to_str(&data["type"]),
            is_verified: to_bool(&data["isVerified"]),
            pin: Pin::from_json(data),
            color: to_int(&data["color"]),
            url: to_str(&data["url"]),
            country_code: to_str(&data["countryCode"]),
            battle_royale_level: to_int(&data["br"]["level"]),
            battle_royale_division: to_int(&data["br"]["division"]),
            streak_progress: non_null(&data["streakProgress"]),
            explorer_progress: non_null(&data["explorerProgress"]),
            daily_challenge_progress: to_int(&data["dailyChallengeProgress"]),
            progress: LevelProgress::from_json(&data["progress"]),
            competitive,
            last_name_change: to_timestamp(&data["lastNameChange"]),
            last_nick_or_country_change: to_timestamp(&data["lastNickOrCountryChange"]),
            is_banned: to_bool(&data["isBanned"]),
            chat_ban: to_bool(&data["chatBan"]),
            name_change_available_at: to_timestamp(&data["nameChangeAvailableAt"]),
            avatar_url,
            is_bot_user: to_bool(&data["isBotUser"]),
            suspended_until: to_timestamp(&data["suspendedUntil"]),
            wallet: to_int(&data["wallet"]),
            flair: to_int(&data["flair"]),
            is_creator: to_bool(&data["isCreator"]),
            is_app_anonymous: to_bool(&data["isAppAnonymous"]),
            steam_user_type: to_int(&data["steamUserType"]),
            stats: None,
        }
    }

    /// Attach the stats block fetched separately from the stats endpoint
    pub fn set_stats(&mut self, stats: Stats) {
        self.stats = Some(stats);
    }
}

/// Friends of the authenticated account, keyed by nick
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Friends {
    /// Nick to user id
    pub by_nick: BTreeMap<String, String>,
}

impl Friends {
    /// Build from the friends summary; entries lacking a nick or id are skipped
    pub fn from_json(data: &Value) -> Self {
        let by_nick = non_null_items(&data["friends"])
            .filter_map(|friend| Some((to_str(&friend["nick"])?, to_str(&friend["userId"])?)))
            .collect();
        Self { by_nick }
    }

    pub fn user_id(&self, nick: &str) -> Option<&str> {
        self.by_nick.get(nick).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn sample_profile() -> Value {
        json!({
            "nick": "Explorer",
            "created": "2019-06-01T12:30:45.1234567Z",
            "isProUser": true,
            "type": "Pro",
            "isVerified": false,
            "pin": {"url": "pin/abc.png", "anchor": "center-center", "isDefault": false},
            "fullBodyPin": "pin/full.png",
            "color": 0,
            "url": "/user/5f1a",
            "id": "5f1a",
            "countryCode": "fr",
            "br": {"level": 12, "division": 3},
            "progress": {
                "level": 120,
                "xp": 250000,
                "levelXp": 240000,
                "nextLevelXp": 260000,
                "nextLevel": 121,
                "title": {"id": 7, "tierId": 20, "minimumLevel": 100, "name": "Navigator"},
                "competitionMedals": {"bronze": 1, "silver": 2, "gold": 3, "platinum": 0}
            },
            "competitive": {"elo": 1100, "rating": 1150, "division": {"type": 30, "startRating": 1000}},
            "lastNameChange": "2020-01-01T00:00:00",
            "lastNickOrCountryChange": "not a date",
            "avatar": {"fullBodyPath": "avatar/full.png"},
            "wallet": "35"
        })
    }

    #[test]
    fn test_profile_nested_blocks() {
        let profile = Profile::from_json(&sample_profile());

        assert_eq!(profile.id.as_deref(), Some("5f1a"));
        assert_eq!(profile.nick.as_deref(), Some("Explorer"));
        assert_eq!(profile.created_at.map(|t| t.year()), Some(2019));
        assert_eq!(profile.pin.url.as_deref(), Some("pin/abc.png"));
        assert_eq!(profile.pin.is_default, Some(false));
        assert_eq!(profile.pin.full_body.as_deref(), Some("pin/full.png"));
        assert_eq!(profile.battle_royale_division, Some(3));
        assert_eq!(profile.progress.level_xp_start, Some(240000));
        assert_eq!(profile.progress.title.name.as_deref(), Some("Navigator"));
        assert_eq!(profile.progress.competition_medals.gold, Some(3));
        assert_eq!(profile.avatar_url.as_deref(), Some("avatar/full.png"));
        assert_eq!(profile.wallet, Some(35));

        let competitive = profile.competitive.expect("competitive block");
        assert_eq!(competitive.elo, Some(1100));
        assert_eq!(competitive.division.division_type, Some(30));
        assert_eq!(competitive.division.end_rating, None);
    }

    #[test]
    fn test_profile_malformed_timestamps_become_none() {
        let profile = Profile::from_json(&sample_profile());
        assert!(profile.last_name_change.is_some());
        assert_eq!(profile.last_nick_or_country_change, None);
        assert_eq!(profile.suspended_until, None);
    }

    #[test]
    fn test_profile_from_empty_object() {
        let profile = Profile::from_json(&json!({}));
        assert_eq!(profile, Profile::default());
        assert!(profile.competitive.is_none());
        assert!(profile.stats.is_none());
    }

    #[test]
    fn test_profile_empty_id_is_absent() {
        let profile = Profile::from_json(&json!({"id": ""}));
        assert_eq!(profile.id, None);
    }

    #[test]
    fn test_empty_competitive_block_is_absent() {
        let profile = Profile::from_json(&json!({"competitive": {}}));
        assert!(profile.competitive.is_none());
    }

    #[test]
    fn test_set_stats_attaches_block() {
        let mut profile = Profile::from_json(&sample_profile());
        profile.set_stats(Stats::from_json(&json!({"perfectRounds": 4})));
        assert_eq!(profile.stats.and_then(|s| s.perfect_rounds), Some(4));
    }

    #[test]
    fn test_friends_summary() {
        let friends = Friends::from_json(&json!({
            "friends": [
                {"nick": "alice", "userId": "a1"},
                null,
                {"nick": "bob"},
                {"nick": "carol", "userId": "c3"}
            ]
        }));
        assert_eq!(friends.by_nick.len(), 2);
        assert_eq!(friends.user_id("carol"), Some("c3"));
        assert_eq!(friends.user_id("bob"), None);
    }
}
