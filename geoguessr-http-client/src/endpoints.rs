//! The GeoGuessr endpoint catalogue
//!
//! Every URL the client requests is built here, from two roots: the web API host
//! and the game server host. Path segments and query values are percent-encoded
//! by `Url`.

use crate::error::GeoError;
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.geoguessr.com";
pub const DEFAULT_GAME_SERVER_URL: &str = "https://game-server.geoguessr.com";

/// Leaderboard page size requested from the highscores endpoint
const HIGHSCORES_LIMIT: &str = "26";
/// Minimum finished rounds for a highscore to be listed
const HIGHSCORES_MIN_ROUNDS: &str = "5";
/// Page size of the activity feed follow-up pages
const FEED_PAGE_SIZE: &str = "1000";

/// URL builder for both API hosts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base_url: Url,
    game_server_url: Url,
}

impl Endpoints {
    pub fn new(base_url: Url, game_server_url: Url) -> Self {
        Self {
            base_url,
            game_server_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn game_server_url(&self) -> &Url {
        &self.game_server_url
    }

    /// `/api/v3/profiles/` of the authenticated account
    pub fn my_profile(&self) -> Result<Url, GeoError> {
        join(&self.base_url, &["api", "v3", "profiles", ""])
    }

    pub fn user(&self, user_id: &str) -> Result<Url, GeoError> {
        join(&self.base_url, &["api", "v3", "users", user_id])
    }

    pub fn user_stats(&self, user_id: &str) -> Result<Url, GeoError> {
        join(&self.base_url, &["api", "v4", "stats", "users", user_id])
    }

    pub fn user_elo(&self, user_id: &str) -> Result<Url, GeoError> {
        join(&self.base_url, &["api", "v4", "ranked-system", "best", user_id])
    }

    pub fn friends_summary(&self) -> Result<Url, GeoError> {
        let mut url = join(&self.base_url, &["api", "v3", "social", "friends", "summary"])?;
        url.query_pairs_mut()
            .append_pair("page", "0")
            .append_pair("fast", "true");
        Ok(url)
    }

    /// Private activity feed; the first page takes no query, follow-ups carry the
    /// page size and cursor
    pub fn private_feed(&self, cursor: Option<&str>) -> Result<Url, GeoError> {
        let mut url = join(&self.base_url, &["api", "v4", "feed", "private"])?;
        if let Some(cursor) = cursor {
            url.query_pairs_mut()
                .append_pair("count", FEED_PAGE_SIZE)
                .append_pair("paginationToken", cursor);
        }
        Ok(url)
    }

    /// Challenge document (GET) and challenge start (POST)
    pub fn challenge(&self, token: &str) -> Result<Url, GeoError> {
        join(&self.base_url, &["api", "v3", "challenges", token])
    }

    /// Challenge creation (POST)
    pub fn challenges(&self) -> Result<Url, GeoError> {
        join(&self.base_url, &["api", "v3", "challenges"])
    }

    /// Guess submission (POST)
    pub fn game(&self, game_token: &str) -> Result<Url, GeoError> {
        join(&self.base_url, &["api", "v3", "games", game_token])
    }

    /// Game state as the web client fetches it between rounds
    pub fn game_view(&self, game_token: &str) -> Result<Url, GeoError> {
        let mut url = self.game(game_token)?;
        url.query_pairs_mut().append_pair("client", "web");
        Ok(url)
    }

    pub fn highscores(&self, token: &str, cursor: Option<&str>) -> Result<Url, GeoError> {
        let mut url = join(&self.base_url, &["api", "v3", "results", "highscores", token])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("friends", "false")
                .append_pair("limit", HIGHSCORES_LIMIT)
                .append_pair("minRounds", HIGHSCORES_MIN_ROUNDS);
            if let Some(cursor) = cursor {
                query.append_pair("paginationToken", cursor);
            }
        }
        Ok(url)
    }

    pub fn map(&self, token: &str) -> Result<Url, GeoError> {
        join(&self.base_url, &["api", "maps", token])
    }

    pub fn map_search(&self, query: &str) -> Result<Url, GeoError> {
        let mut url = join(&self.base_url, &["api", "v3", "search", "map"])?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    pub fn duel(&self, duel_id: &str) -> Result<Url, GeoError> {
        join(&self.game_server_url, &["api", "duels", duel_id])
    }

    pub fn replay(&self, player_id: &str, game_id: &str, round: i64) -> Result<Url, GeoError> {
        join(
            &self.game_server_url,
            &["api", "replays", player_id, game_id, &round.to_string()],
        )
    }

    /// Shareable link of a challenge
    pub fn challenge_link(&self, token: &str) -> Result<Url, GeoError> {
        join(&self.base_url, &["challenge", token])
    }

    /// Summary page of a duel, as linked from the activity feed
    pub fn duel_summary_link(&self, duel_id: &str) -> Result<Url, GeoError> {
        join(&self.base_url, &["duels", duel_id, "summary"])
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        // Both constants are valid absolute URLs
        let parse = |raw| Url::parse(raw).unwrap_or_else(|_| unreachable!("invalid default URL {raw}"));
        Self::new(parse(DEFAULT_BASE_URL), parse(DEFAULT_GAME_SERVER_URL))
    }
}

fn join(root: &Url, segments: &[&str]) -> Result<Url, GeoError> {
    let mut url = root.clone();
    url.path_segments_mut()
        .map_err(|_| GeoError::ClientInit(format!("Cannot use {root} as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Token of a challenge, map or game link: its last path segment
///
/// A bare token is returned as is. Query strings, fragments and trailing slashes
/// are ignored.
pub fn token_from_url(url: &str) -> &str {
    path_segments(url).next_back().unwrap_or("")
}

/// Id of a duel link
///
/// Accepts both `/duels/{id}` and the `/duels/{id}/summary` form linked from the
/// activity feed.
pub fn duel_id_from_url(url: &str) -> &str {
    let mut segments = path_segments(url);
    match segments.next_back() {
        Some("summary") => segments.next_back().unwrap_or(""),
        Some(last) => last,
        None => "",
    }
}

fn path_segments(url: &str) -> impl DoubleEndedIterator<Item = &str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.split('/').filter(|segment| !segment.is_empty())
}
