//! GeoGuessr response models
//!
//! Typed, immutable snapshots of the JSON documents returned by the GeoGuessr API.
//! The API is not versioned and its payloads drift: fields disappear, numbers arrive
//! as strings, coordinates arrive wrapped in tagged "Big Number" objects. Every model
//! is therefore built through the total coercion functions in [`convert`], so a
//! malformed or missing field becomes `None` instead of failing the whole document.
//!
//! # Overview
//!
//! This library provides:
//! - Scalar coercion primitives that never panic ([`convert`])
//! - A dictionary flattening utility with camel-cased compound keys ([`flatten`])
//! - One model per API resource shape (profiles, stats, challenges, maps, duels, ...)
//! - Tree rendering of any model through [`ToTree`] and `Display`
//!
//! # Quick Example
//!
//! ```
//! use geoguessr_models::{Challenge, GameMode};
//! use serde_json::json;
//!
//! let challenge = Challenge::from_json(&json!({
//!     "token": "aBcD1234",
//!     "timeLimit": 125,
//!     "forbidMoving": true,
//!     "forbidRotating": false,
//!     "forbidZooming": false,
//! }));
//!
//! assert_eq!(challenge.game_mode, GameMode::NoMove);
//! assert_eq!(challenge.time_limit_label.as_deref(), Some("2 min 5 sec"));
//! ```
//!
//! # Key Concepts
//!
//! ## Construction
//!
//! Every model exposes `from_json(&Value) -> Self`. The only fallible constructors
//! are [`ChallengeResult::try_from_json`], which requires the root `game` object,
//! and [`DuelReplay::try_from_json`], which rejects event kinds outside the nine
//! known ones.
//!
//! ## Late-bound fields
//!
//! Two fields are filled after construction: [`Profile::set_stats`] once the stats
//! endpoint has answered, and [`Duel::set_replays`] once every round replay has been
//! fetched.

extern crate self as geoguessr_models;

pub mod convert;
pub mod flatten;
pub mod tree;

mod activity;
mod challenge;
mod duel;
mod elo;
mod error;
mod map;
mod profile;
mod replay;
mod result;
mod stats;

// Re-export public API
pub use activity::{Activities, RankedDuel};
pub use challenge::{Challenge, ChallengeInfo, GameMode, MovementOptions, describe_time_limit};
pub use duel::{
    AwardedXp, Coordinate, Duel, DuelGuess, DuelMap, DuelOptions, DuelPlayer, DuelResult, DuelRound,
    DuelTeam, GameContext, MapBounds, Panorama, PlayerReplays, ProgressChange, RankedSystemProgress,
    TeamRoundResult, XpAward,
};
pub use elo::UserElo;
pub use error::ModelError;
pub use map::{Map, MapAvatar};
pub use profile::{
    CompetitionMedals, Competitive, Division, Friends, Level, LevelProgress, Pin, Profile, XpTitle,
};
pub use replay::{DuelReplay, ReplayEvent, ReplayEventKind, ReplayPayload};
pub use result::{
    ChallengeResult, ChallengeRound, Distance, GameBounds, Leaderboard, PlayerGuess, PlayerTotalResult,
    Score, ScorePlayerInfo, Time,
};
pub use stats::{
    BattleRoyaleDistanceStats, DuelStats, GuessingModeStats, MedalCount, PartyStats, QuickplayRecord,
    Stats, TeamDuelRecord, XpProgression,
};
pub use tree::{ToTree, TreeValue, TreeWriter};

// Re-export the derive macro
pub use geoguessr_models_macros::ToTree;
