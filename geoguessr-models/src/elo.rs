//! Ranked rating snapshot from `/api/v4/ranked-system/best/{id}`

use crate::ToTree;
use crate::convert::{to_int, to_str};
use crate::flatten::flatten;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct UserElo {
    pub division_number: Option<i64>,
    pub division_name: Option<String>,
    pub rating: Option<i64>,
    pub tier: Option<String>,
    pub standard_duels_rating: Option<i64>,
    pub nmpz_duels_rating: Option<i64>,
    pub no_move_duels_rating: Option<i64>,
}

impl UserElo {
    /// Build from the ranked-system document, read through its flattened keys
    pub fn from_json(data: &Value) -> Self {
        let Some(object) = data.as_object() else {
            return Self::default();
        };
        let flat = flatten(object);
        let get = |key: &str| flat.get(key).unwrap_or(&Value::Null);

        Self {
            division_number: to_int(get("divisionNumber")),
            division_name: to_str(get("divisionName")),
            rating: to_int(get("rating")),
            tier: to_str(get("tier")),
            standard_duels_rating: to_int(get("gameModeRatingsStandardduels")),
            nmpz_duels_rating: to_int(get("gameModeRatingsNmpzduels")),
            no_move_duels_rating: to_int(get("gameModeRatingsNomoveduels")),
        }
    }
}
