//! GeoGuessr client implementation

use crate::endpoints::{
    DEFAULT_BASE_URL, DEFAULT_GAME_SERVER_URL, Endpoints, duel_id_from_url, token_from_url,
};
use crate::error::GeoError;
use crate::pagination::drain_pages;
use crate::transport::{HttpTransport, Transport, session_headers};
use geoguessr_models::convert::to_str;
use geoguessr_models::{
    Activities, ChallengeInfo, ChallengeResult, Duel, DuelReplay, Friends, Leaderboard, Map,
    ModelError, Profile, Stats, ToTree, UserElo,
};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

/// Rounds of every challenge the client creates or plays
const CHALLENGE_ROUNDS: usize = 5;

/// Rules of a challenge created by [`GeoguessrClient::generate_challenge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeSettings {
    pub can_move: bool,
    pub can_pan: bool,
    pub can_zoom: bool,
    /// Seconds per round, 0 for no limit
    pub time_limit: i64,
}

impl Default for ChallengeSettings {
    /// Moving, panning and zooming allowed, two minutes per round
    fn default() -> Self {
        Self {
            can_move: true,
            can_pan: true,
            can_zoom: true,
            time_limit: 120,
        }
    }
}

/// A ranked duel of the activity feed, as a summary link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct RankedDuelLink {
    /// `%d-%m-%Y %H:%M:%S`, absent when the feed entry has no usable time
    pub time: Option<String>,
    pub url: String,
}

/// Everything the client knows about the authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, ToTree)]
#[serde(rename_all = "camelCase")]
pub struct MyInfo {
    pub id: String,
    pub profile: Profile,
    pub stats: Stats,
    pub elo: Option<UserElo>,
    pub friends: Friends,
    pub activities: Activities,
}

/// The GeoGuessr API client
///
/// Every request carries the `_ncfa` session cookie given at construction. The
/// underlying connection pool lives as long as the client; drop it, or call
/// [`GeoguessrClient::close`], to release it.
///
/// # Example
///
/// ```no_run
/// use geoguessr_http_client::GeoguessrClient;
///
/// # async fn run() -> Result<(), geoguessr_http_client::GeoError> {
/// let client = GeoguessrClient::new("your_ncfa_cookie")?;
///
/// let id = client.get_my_id().await?;
/// let profile = client.get_profile(&id).await?;
/// println!("{profile}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GeoguessrClient<T = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
}

impl GeoguessrClient<HttpTransport> {
    /// Create a client for the public GeoGuessr hosts
    ///
    /// # Errors
    ///
    /// Returns `GeoError::ClientInit` if the cookie is not a valid header value or
    /// the HTTP client cannot be initialized.
    pub fn new(ncfa: &str) -> Result<Self, GeoError> {
        Self::builder().build(ncfa)
    }

    /// Create a builder for configuring the client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use geoguessr_http_client::GeoguessrClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeoguessrClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .game_server_url("http://localhost:1235")?
    ///     .build("your_ncfa_cookie")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> GeoguessrClientBuilder {
        GeoguessrClientBuilder::new()
    }
}

impl<T: Transport> GeoguessrClient<T> {
    /// Create a client over any transport
    pub fn with_transport(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Release the transport
    pub fn close(self) {
        debug!("closing GeoGuessr client");
    }

    async fn get_json(&self, url: Url) -> Result<Value, GeoError> {
        self.transport.get(url).await?.error_for_status()?.json()
    }

    async fn post_json(&self, url: Url, body: &Value) -> Result<Value, GeoError> {
        self.transport.post(url, body).await?.error_for_status()?.json()
    }

    /// Id of the account owning the session cookie
    ///
    /// # Errors
    ///
    /// Fails with `ModelError::MissingData` if the profile has no `user.id`.
    pub async fn get_my_id(&self) -> Result<String, GeoError> {
        let data = self.get_json(self.endpoints.my_profile()?).await?;
        to_str(&data["user"]["id"])
            .filter(|id| !id.is_empty())
            .ok_or(GeoError::Model(ModelError::MissingData("user")))
    }

    pub async fn get_friends(&self) -> Result<Friends, GeoError> {
        let data = self.get_json(self.endpoints.friends_summary()?).await?;
        Ok(Friends::from_json(&data))
    }

    /// Every entry of the private activity feed, following pagination to the end
    pub async fn get_activities(&self) -> Result<Activities, GeoError> {
        let first_page = self.get_json(self.endpoints.private_feed(None)?).await?;
        let entries = drain_pages(&self.transport, first_page, "entries", |cursor| {
            self.endpoints.private_feed(Some(cursor))
        })
        .await?;
        Ok(Activities::from_entries(entries))
    }

    /// Profile of a user, with its stats block attached
    ///
    /// # Errors
    ///
    /// Returns `GeoError::NonExistingUser` when the API answers 404.
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, GeoError> {
        let response = self.transport.get(self.endpoints.user(user_id)?).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Err(GeoError::NonExistingUser(user_id.to_string()));
        }

        let mut profile = Profile::from_json(&response.error_for_status()?.json()?);
        let stats_id = profile.id.clone().unwrap_or_else(|| user_id.to_string());
        profile.set_stats(self.get_stats(&stats_id).await?);
        Ok(profile)
    }

    pub async fn get_stats(&self, user_id: &str) -> Result<Stats, GeoError> {
        let data = self.get_json(self.endpoints.user_stats(user_id)?).await?;
        Ok(Stats::from_json(&data))
    }

    /// Best ranked ratings of a user
    ///
    /// Players without ranked history get a non-JSON answer; that resolves to
    /// `Ok(None)`.
    pub async fn get_elo(&self, user_id: &str) -> Result<Option<UserElo>, GeoError> {
        let response = self.transport.get(self.endpoints.user_elo(user_id)?).await?;
        if !response.is_json() {
            info!(user_id, "no ranked rating available");
            return Ok(None);
        }
        let data = response.error_for_status()?.json()?;
        Ok(Some(UserElo::from_json(&data)))
    }

    /// Settings, map and creator of a challenge, from its link or token
    pub async fn get_challenge_info(&self, challenge_url: &str) -> Result<ChallengeInfo, GeoError> {
        let token = token_from_url(challenge_url);
        let data = self.get_json(self.endpoints.challenge(token)?).await?;
        Ok(ChallengeInfo::from_json(&data))
    }

    /// Complete leaderboard of a challenge
    ///
    /// The highscores endpoint refuses accounts that have not played the
    /// challenge. On a non-success answer the challenge is played once with
    /// [`play_challenge`](Self::play_challenge) and the request retried once.
    ///
    /// # Errors
    ///
    /// Returns `GeoError::InvalidStatus` if the retry fails too, and
    /// `ModelError::MissingData` if a leaderboard item has no `game`.
    pub async fn get_challenge_score(&self, challenge_url: &str) -> Result<Leaderboard, GeoError> {
        let token = token_from_url(challenge_url);
        let url = self.endpoints.highscores(token, None)?;

        let mut response = self.transport.get(url.clone()).await?;
        if !response.is_success() {
            warn!(
                token,
                status = %response.status,
                "highscores refused, playing the challenge before retrying"
            );
            self.play_challenge(challenge_url).await?;
            response = self.transport.get(url).await?;
        }

        let first_page = response.error_for_status()?.json()?;
        let items = drain_pages(&self.transport, first_page, "items", |cursor| {
            self.endpoints.highscores(token, Some(cursor))
        })
        .await?;
        debug!(token, results = items.len(), "leaderboard fetched");
        Ok(Leaderboard::try_from_items(&items)?)
    }

    /// Play a challenge with null guesses: every round is timed out at (0, 0)
    pub async fn play_challenge(&self, challenge_url: &str) -> Result<(), GeoError> {
        let token = token_from_url(challenge_url);
        let game = self.post_json(self.endpoints.challenge(token)?, &json!({})).await?;
        let game_token = to_str(&game["token"])
            .filter(|token| !token.is_empty())
            .ok_or(GeoError::Model(ModelError::MissingData("token")))?;
        debug!(challenge = token, game = %game_token, "challenge started");

        // Round answers are not read: only transport failures abort
        let guess = json!({"token": game_token, "lat": 0, "lng": 0, "timedOut": true});
        for round in 1..=CHALLENGE_ROUNDS {
            let answer = self.transport.post(self.endpoints.game(&game_token)?, &guess).await?;
            if round < CHALLENGE_ROUNDS {
                self.transport.get(self.endpoints.game_view(&game_token)?).await?;
            }
            debug!(game = %game_token, round, status = %answer.status, "round played");
        }
        Ok(())
    }

    /// Create a five-round challenge on a map and return its link
    ///
    /// With `play` set, the challenge is played right away so that its
    /// leaderboard becomes readable.
    pub async fn generate_challenge(
        &self,
        map_url: &str,
        settings: &ChallengeSettings,
        play: bool,
    ) -> Result<String, GeoError> {
        let body = json!({
            "map": token_from_url(map_url),
            "forbidMoving": !settings.can_move,
            "forbidRotating": !settings.can_pan,
            "forbidZooming": !settings.can_zoom,
            "timeLimit": settings.time_limit,
            "rounds": CHALLENGE_ROUNDS,
        });
        let data = self.post_json(self.endpoints.challenges()?, &body).await?;
        let token = to_str(&data["token"])
            .filter(|token| !token.is_empty())
            .ok_or(GeoError::Model(ModelError::MissingData("token")))?;

        let link = self.endpoints.challenge_link(&token)?.to_string();
        info!(%link, "challenge created");
        if play {
            self.play_challenge(&link).await?;
        }
        Ok(link)
    }

    /// Map metadata, completed with its coordinate count from the map search
    ///
    /// The count is kept as the search reports it (`"100K+"`). A failing search
    /// leaves it at `"0"`.
    pub async fn get_map_info(&self, map_url: &str) -> Result<Map, GeoError> {
        let token = token_from_url(map_url);
        let mut data = self.get_json(self.endpoints.map(token)?).await?;

        match self.coordinate_count(token).await {
            Ok(count) => {
                if let Value::Object(fields) = &mut data {
                    fields.insert("coordinateCount".to_string(), count);
                }
            }
            Err(err) => debug!(map = token, error = %err, "coordinate count unavailable"),
        }
        Ok(Map::from_json(&data))
    }

    async fn coordinate_count(&self, token: &str) -> Result<Value, GeoError> {
        let results = self.get_json(self.endpoints.map_search(token)?).await?;
        match results[0]["coordinateCount"].clone() {
            Value::Null => Err(GeoError::UnexpectedResponse(
                "map search has no coordinate count".to_string(),
            )),
            count => Ok(count),
        }
    }

    /// Duel state from a duel link, its summary link or its id
    pub async fn get_duel_info(&self, duel_url: &str) -> Result<Duel, GeoError> {
        let duel_id = duel_id_from_url(duel_url);
        let data = self.get_json(self.endpoints.duel(duel_id)?).await?;
        Ok(Duel::from_json(&data))
    }

    /// Fetch the replay of every player for every played round and attach them
    ///
    /// Requests are issued one at a time, players in team order and rounds in
    /// order. The first failure aborts and leaves the duel untouched.
    pub async fn set_replays(&self, duel: &mut Duel) -> Result<(), GeoError> {
        let game_id = duel
            .game_id
            .clone()
            .ok_or(GeoError::Model(ModelError::MissingData("gameId")))?;

        let mut replays = Vec::with_capacity(duel.player_ids.len());
        for player_id in &duel.player_ids {
            let mut rounds = Vec::new();
            for round in duel.replay_rounds() {
                let url = self.endpoints.replay(player_id, &game_id, round)?;
                let data = self.get_json(url).await?;
                rounds.push(DuelReplay::try_from_json(&data)?);
            }
            debug!(player = %player_id, rounds = rounds.len(), "replays fetched");
            replays.push((player_id.clone(), rounds));
        }

        duel.set_replays(replays.into_iter().collect());
        Ok(())
    }

    /// Ranked duels of the authenticated account, newest first as the feed lists
    /// them
    pub async fn get_ranked_duel_activity(&self) -> Result<Vec<RankedDuelLink>, GeoError> {
        let activities = self.get_activities().await?;
        activities
            .ranked_duels()
            .into_iter()
            .map(|duel| {
                Ok(RankedDuelLink {
                    time: duel.formatted_time(),
                    url: self.endpoints.duel_summary_link(&duel.game_id)?.to_string(),
                })
            })
            .collect()
    }

    /// Profile, stats, rating, friends and feed of the authenticated account
    pub async fn get_all_my_info(&self) -> Result<MyInfo, GeoError> {
        let id = self.get_my_id().await?;
        let profile = self.get_profile(&id).await?;
        let stats = profile.stats.clone().unwrap_or_default();
        let elo = self.get_elo(&id).await?;
        let friends = self.get_friends().await?;
        let activities = self.get_activities().await?;
        info!(
            user = %id,
            friends = friends.by_nick.len(),
            activities = activities.len(),
            "account loaded"
        );

        Ok(MyInfo {
            id,
            profile,
            stats,
            elo,
            friends,
            activities,
        })
    }
}

/// Builder for configuring a GeoGuessr client
///
/// Both hosts can be overridden, which is how the tests point the client at a
/// mock server.
///
/// # Example
///
/// ```no_run
/// use geoguessr_http_client::GeoguessrClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeoguessrClient::builder()
///     .client_builder(reqwest::Client::builder().timeout(Duration::from_secs(30)))
///     .build("your_ncfa_cookie")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GeoguessrClientBuilder {
    base_url: Option<Url>,
    game_server_url: Option<Url>,
    client_builder: Option<reqwest::ClientBuilder>,
}

impl GeoguessrClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the web API host
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, GeoError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set the game server host serving duels and replays
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn game_server_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, GeoError> {
        self.game_server_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, ...)
    ///
    /// The session headers are always added on top of its configuration.
    pub fn client_builder(mut self, builder: reqwest::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the client for the given `_ncfa` session cookie
    ///
    /// # Errors
    ///
    /// Returns `GeoError::ClientInit` if the cookie is not a valid header value or
    /// the HTTP client cannot be initialized.
    pub fn build(self, ncfa: &str) -> Result<GeoguessrClient, GeoError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => parse_default(DEFAULT_BASE_URL)?,
        };
        let game_server_url = match self.game_server_url {
            Some(url) => url,
            None => parse_default(DEFAULT_GAME_SERVER_URL)?,
        };

        let client = self
            .client_builder
            .unwrap_or_else(|| reqwest::Client::builder().use_rustls_tls())
            .default_headers(session_headers(ncfa)?)
            .build()
            .map_err(|e| GeoError::ClientInit(e.to_string()))?;

        Ok(GeoguessrClient::with_transport(
            HttpTransport::new(client),
            Endpoints::new(base_url, game_server_url),
        ))
    }
}

fn parse_default(url: &str) -> Result<Url, GeoError> {
    Url::parse(url).map_err(|e| GeoError::ClientInit(format!("Failed to parse default URL: {e}")))
}
