//! CLI argument parsing using clap

use clap::{Parser, Subcommand};

/// Query the GeoGuessr API with your session cookie
///
/// The `_ncfa` cookie is read from `GEOGUESSR_NCFA`, or prompted for when unset.
#[derive(Parser, Debug)]
#[command(name = "geoguessr", about = "Query the GeoGuessr API", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Print JSON instead of a field tree
    #[arg(long, global = true)]
    pub json: bool,

    /// Web API host
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Game server host (duels and replays)
    #[arg(long, global = true)]
    pub game_server_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Id of the authenticated account
    MyId,
    /// Profile, stats, rating, friends and activity feed of the authenticated account
    Me,
    /// Profile of a user, stats included
    Profile { user_id: String },
    /// Stats of a user
    Stats { user_id: String },
    /// Best ranked ratings of a user
    Elo { user_id: String },
    /// Friends of the authenticated account
    Friends,
    /// Private activity feed of the authenticated account
    Activities,
    /// Ranked duels found in the activity feed
    RankedDuels,
    /// Settings, map and creator of a challenge
    Challenge {
        /// Challenge link or token
        url: String,
    },
    /// Full leaderboard of a challenge, playing it first if needed
    Score {
        /// Challenge link or token
        url: String,
    },
    /// Play a challenge with timed-out guesses
    Play {
        /// Challenge link or token
        url: String,
    },
    /// Create a five-round challenge on a map
    Generate {
        /// Map link or id
        map_url: String,

        /// Forbid moving
        #[arg(long)]
        no_move: bool,

        /// Forbid panning
        #[arg(long)]
        no_pan: bool,

        /// Forbid zooming
        #[arg(long)]
        no_zoom: bool,

        /// Seconds per round, 0 for no limit
        #[arg(long, default_value_t = 120)]
        time_limit: i64,

        /// Do not play the challenge after creating it
        #[arg(long)]
        no_play: bool,
    },
    /// Metadata of a map
    Map {
        /// Map link or id
        url: String,
    },
    /// State of a duel
    Duel {
        /// Duel link, summary link or id
        url: String,

        /// Also fetch every round replay of every player
        #[arg(long)]
        replays: bool,
    },
}
