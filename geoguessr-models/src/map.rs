//! Map catalogue metadata

use crate::ToTree;
use crate::convert::{non_null, to_bool, to_int, to_str, to_timestamp};
use crate::profile::Profile;
use crate::result::GameBounds;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

/// Landscape layers of the map's avatar
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct MapAvatar {
    pub background: Option<String>,
    pub decoration: Option<String>,
    pub ground: Option<String>,
    pub landscape: Option<String>,
}

impl MapAvatar {
    pub fn from_json(data: &Value) -> Self {
        Self {
            background: to_str(&data["background"]),
            decoration: to_str(&data["decoration"]),
            ground: to_str(&data["ground"]),
            landscape: to_str(&data["landscape"]),
        }
    }
}

/// A map from `/api/maps/{token}`
///
/// `coordinate_count` does not come from the map document itself: callers put the
/// count found through the map search under `coordinateCount` before building.
/// The search reports it as display text (`"100K+"`), so it is kept as a string
/// and reads as `"0"` when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct Map {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub play_url: Option<String>,
    pub published: Option<bool>,
    pub banned: Option<bool>,
    pub background: Option<String>,
    pub bounds: GameBounds,
    pub custom_coordinates: Option<Value>,
    pub coordinate_count: String,
    pub regions: Option<Value>,
    pub creator: Option<Profile>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub num_finished_games: Option<i64>,
    pub liked_by_user: Option<Value>,
    pub average_score: Option<i64>,
    pub avatar: Option<MapAvatar>,
    pub difficulty: Option<String>,
    pub difficulty_level: Option<i64>,
    pub highscore: Option<Value>,
    pub deleted: Option<bool>,
    pub free: Option<bool>,
    pub panorama_provider: Option<String>,
    pub in_explorer_mode: Option<bool>,
    pub max_error_distance: Option<i64>,
    pub likes: Option<i64>,
    pub location_selection_mode: Option<i64>,
    pub tags: Option<Value>,
    pub collaborators: Option<Value>,
    pub flair: Option<i64>,
    pub map_size: Option<Value>,
}

impl Map {
    pub fn from_json(data: &Value) -> Self {
        Self {
            id: to_str(&data["id"]),
            name: to_str(&data["name"]),
            slug: to_str(&data["slug"]),
            description: to_str(&data["description"]),
            url: to_str(&data["url"]),
            play_url: to_str(&data["playUrl"]),
            published: to_bool(&data["published"]),
            banned: to_bool(&data["banned"]),
            background: to_str(&data["images"]["backgroundLarge"]),
            bounds: GameBounds::from_json(&data["bounds"]),
            custom_coordinates: non_null(&data["customCoordinates"]),
            coordinate_count: to_str(&data["coordinateCount"]).unwrap_or_else(|| "0".to_string()),
            regions: non_null(&data["regions"]),
            creator: data["creator"]
                .is_object()
                .then(|| Profile::from_json(&data["creator"])),
            created_at: to_timestamp(&data["createdAt"]),
            updated_at: to_timestamp(&data["updatedAt"]),
            num_finished_games: to_int(&data["numFinishedGames"]),
            liked_by_user: non_null(&data["likedByUser"]),
            average_score: to_int(&data["averageScore"]),
            avatar: data["avatar"]
                .as_object()
                .filter(|avatar| !avatar.is_empty())
                .map(|_| MapAvatar::from_json(&data["avatar"])),
            difficulty: to_str(&data["difficulty"]),
            difficulty_level: to_int(&data["difficultyLevel"]),
            highscore: non_null(&data["highscore"]),
            deleted: to_bool(&data["deleted"]),
            free: to_bool(&data["free"]),
            panorama_provider: to_str(&data["panoramaProvider"]),
            in_explorer_mode: to_bool(&data["inExplorerMode"]),
            max_error_distance: to_int(&data["maxErrorDistance"]),
            likes: to_int(&data["likes"]),
            location_selection_mode: to_int(&data["locationSelectionMode"]),
            tags: non_null(&data["tags"]),
            collaborators: non_null(&data["collaborators"]),
            flair: to_int(&data["flair"]),
            map_size: non_null(&data["mapSize"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_fields() {
        let map = Map::from_json(&json!({
            "id": "62a44b22040f04bd36e8a914",
            "name": "A Community World",
            "slug": "a-community-world",
            "published": true,
            "images": {"backgroundLarge": "images/bg.jpg"},
            "bounds": {"min": {"lat": -50.1, "lng": -170}, "max": {"lat": 70, "lng": 175.5}},
            "creator": {"id": "c1", "nick": "builder"},
            "createdAt": "2022-06-11T08:11:14.123Z",
            "avatar": {"background": "day", "ground": "green"},
            "tags": ["world", "balanced"],
            "coordinateCount": "98000",
            "maxErrorDistance": 18700000
        }));

        assert_eq!(map.slug.as_deref(), Some("a-community-world"));
        assert_eq!(map.background.as_deref(), Some("images/bg.jpg"));
        assert_eq!(map.bounds.min_lat, Some(-50.1));
        assert_eq!(map.creator.and_then(|c| c.nick).as_deref(), Some("builder"));
        assert!(map.created_at.is_some());
        assert_eq!(map.avatar.and_then(|a| a.ground).as_deref(), Some("green"));
        assert_eq!(map.tags, Some(json!(["world", "balanced"])));
        assert_eq!(map.coordinate_count, "98000");
        assert_eq!(map.max_error_distance, Some(18_700_000));
    }

    #[test]
    fn test_missing_coordinate_count_is_zero() {
        let map = Map::from_json(&json!({"id": "m"}));
        assert_eq!(map.coordinate_count, "0");
        assert!(map.creator.is_none());
        assert!(map.avatar.is_none());
    }

    #[test]
    fn test_coordinate_count_keeps_display_text() {
        let map = Map::from_json(&json!({"coordinateCount": "100K+"}));
        assert_eq!(map.coordinate_count, "100K+");
        let map = Map::from_json(&json!({"coordinateCount": 52000}));
        assert_eq!(map.coordinate_count, "52000");
    }

    #[test]
    fn test_empty_avatar_is_absent() {
        let map = Map::from_json(&json!({"avatar": {}}));
        assert!(map.avatar.is_none());
    }
}
