//! Per-round duel replays from the game server

use crate::ToTree;
use crate::convert::{big_number_or_numeric, non_null_items, to_bool, to_epoch_millis, to_float, to_int, to_str};
use crate::error::ModelError;
use crate::tree::{TreeValue, TreeWriter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The nine event kinds a replay can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReplayEventKind {
    PanoPosition,
    PanoPov,
    PanoZoom,
    MapZoom,
    MapPosition,
    GuessWithLatLng,
    PinPosition,
    Timer,
    MapDisplay,
}

impl ReplayEventKind {
    pub const ALL: [ReplayEventKind; 9] = [
        ReplayEventKind::PanoPosition,
        ReplayEventKind::PanoPov,
        ReplayEventKind::PanoZoom,
        ReplayEventKind::MapZoom,
        ReplayEventKind::MapPosition,
        ReplayEventKind::GuessWithLatLng,
        ReplayEventKind::PinPosition,
        ReplayEventKind::Timer,
        ReplayEventKind::MapDisplay,
    ];

    /// Type tag used by the game server
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplayEventKind::PanoPosition => "PanoPosition",
            ReplayEventKind::PanoPov => "PanoPov",
            ReplayEventKind::PanoZoom => "PanoZoom",
            ReplayEventKind::MapZoom => "MapZoom",
            ReplayEventKind::MapPosition => "MapPosition",
            ReplayEventKind::GuessWithLatLng => "GuessWithLatLng",
            ReplayEventKind::PinPosition => "PinPosition",
            ReplayEventKind::Timer => "Timer",
            ReplayEventKind::MapDisplay => "MapDisplay",
        }
    }
}

impl FromStr for ReplayEventKind {
    type Err = ModelError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ReplayEventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ModelError::UnknownReplayEvent(tag.to_string()))
    }
}

impl fmt::Display for ReplayEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a replay event, its shape fixed by the event kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ReplayPayload {
    PanoPosition {
        lat: f64,
        lng: f64,
        pano_id: Option<String>,
    },
    PanoPov {
        heading: Option<f64>,
        pitch: Option<f64>,
    },
    PanoZoom {
        zoom: Option<f64>,
    },
    MapZoom {
        zoom: Option<i64>,
    },
    MapPosition {
        lat: Option<f64>,
        lng: Option<f64>,
    },
    GuessWithLatLng {
        lat: Option<f64>,
        lng: Option<f64>,
    },
    PinPosition {
        lat: Option<f64>,
        lng: Option<f64>,
    },
    Timer {
        time: Option<i64>,
    },
    MapDisplay {
        is_active: Option<bool>,
        is_sticky: Option<bool>,
        size: Option<i64>,
    },
}

impl ReplayPayload {
    /// Parse `data` as the payload shape of `kind`
    pub fn from_json(kind: ReplayEventKind, data: &Value) -> Self {
        match kind {
            ReplayEventKind::PanoPosition => ReplayPayload::PanoPosition {
                lat: big_number_or_numeric(&data["lat"]),
                lng: big_number_or_numeric(&data["lng"]),
                pano_id: to_str(&data["panoId"]),
            },
            ReplayEventKind::PanoPov => ReplayPayload::PanoPov {
                heading: to_float(&data["heading"]),
                pitch: to_float(&data["pitch"]),
            },
            ReplayEventKind::PanoZoom => ReplayPayload::PanoZoom {
                zoom: to_float(&data["zoom"]),
            },
            ReplayEventKind::MapZoom => ReplayPayload::MapZoom {
                zoom: to_int(&data["zoom"]),
            },
            ReplayEventKind::MapPosition => ReplayPayload::MapPosition {
                lat: to_float(&data["lat"]),
                lng: to_float(&data["lng"]),
            },
            ReplayEventKind::GuessWithLatLng => ReplayPayload::GuessWithLatLng {
                lat: to_float(&data["lat"]),
                lng: to_float(&data["lng"]),
            },
            ReplayEventKind::PinPosition => ReplayPayload::PinPosition {
                lat: to_float(&data["lat"]),
                lng: to_float(&data["lng"]),
            },
            ReplayEventKind::Timer => ReplayPayload::Timer {
                time: to_int(&data["time"]),
            },
            ReplayEventKind::MapDisplay => ReplayPayload::MapDisplay {
                is_active: to_bool(&data["isActive"]),
                is_sticky: to_bool(&data["isSticky"]),
                size: to_int(&data["size"]),
            },
        }
    }

    pub fn kind(&self) -> ReplayEventKind {
        match self {
            ReplayPayload::PanoPosition { .. } => ReplayEventKind::PanoPosition,
            ReplayPayload::PanoPov { .. } => ReplayEventKind::PanoPov,
            ReplayPayload::PanoZoom { .. } => ReplayEventKind::PanoZoom,
            ReplayPayload::MapZoom { .. } => ReplayEventKind::MapZoom,
            ReplayPayload::MapPosition { .. } => ReplayEventKind::MapPosition,
            ReplayPayload::GuessWithLatLng { .. } => ReplayEventKind::GuessWithLatLng,
            ReplayPayload::PinPosition { .. } => ReplayEventKind::PinPosition,
            ReplayPayload::Timer { .. } => ReplayEventKind::Timer,
            ReplayPayload::MapDisplay { .. } => ReplayEventKind::MapDisplay,
        }
    }
}

impl TreeValue for ReplayPayload {
    fn write_value(&self, name: &str, out: &mut TreeWriter) {
        out.branch(name, self.kind().as_str(), |out| match self {
            ReplayPayload::PanoPosition { lat, lng, pano_id } => {
                lat.write_value("lat", out);
                lng.write_value("lng", out);
                pano_id.write_value("pano_id", out);
            }
            ReplayPayload::PanoPov { heading, pitch } => {
                heading.write_value("heading", out);
                pitch.write_value("pitch", out);
            }
            ReplayPayload::PanoZoom { zoom } => zoom.write_value("zoom", out),
            ReplayPayload::MapZoom { zoom } => zoom.write_value("zoom", out),
            ReplayPayload::MapPosition { lat, lng }
            | ReplayPayload::GuessWithLatLng { lat, lng }
            | ReplayPayload::PinPosition { lat, lng } => {
                lat.write_value("lat", out);
                lng.write_value("lng", out);
            }
            ReplayPayload::Timer { time } => time.write_value("time", out),
            ReplayPayload::MapDisplay {
                is_active,
                is_sticky,
                size,
            } => {
                is_active.write_value("is_active", out);
                is_sticky.write_value("is_sticky", out);
                size.write_value("size", out);
            }
        });
    }
}

/// One timestamped step of a replay
#[derive(Debug, Clone, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEvent {
    pub time: Option<DateTime<Utc>>,
    pub payload: ReplayPayload,
}

impl ReplayEvent {
    /// Parse one `{"time", "type", "payload"}` step
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownReplayEvent`] when `type` is missing or not one
    /// of the nine known kinds.
    pub fn try_from_json(data: &Value) -> Result<Self, ModelError> {
        let kind = match data["type"].as_str() {
            Some(tag) => tag.parse()?,
            None => return Err(ModelError::UnknownReplayEvent(data["type"].to_string())),
        };

        Ok(Self {
            time: to_epoch_millis(&data["time"]),
            payload: ReplayPayload::from_json(kind, &data["payload"]),
        })
    }

    pub fn kind(&self) -> ReplayEventKind {
        self.payload.kind()
    }
}

/// Every event a player produced during one duel round, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct DuelReplay {
    pub events: Vec<ReplayEvent>,
}

impl DuelReplay {
    /// Parse the array of steps returned by `/api/replays/{player}/{game}/{round}`
    pub fn try_from_json(data: &Value) -> Result<Self, ModelError> {
        let events = non_null_items(data)
            .map(ReplayEvent::try_from_json)
            .collect::<Result<_, _>>()?;
        Ok(Self { events })
    }
}
