//! GeoGuessr HTTP Client Library
//!
//! This library talks to the GeoGuessr web API on behalf of an authenticated
//! account and turns its answers into the typed models of `geoguessr-models`.
//!
//! # Features
//!
//! - Profiles, stats, ranked ratings and friends of any account
//! - Challenge settings, full leaderboards and challenge creation
//! - Map metadata, duel states and per-round duel replays
//! - Cursor pagination followed to the last page
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Async API on top of `reqwest`
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use geoguessr_http_client::{ChallengeSettings, GeoguessrClient};
//!
//! # async fn run() -> Result<(), geoguessr_http_client::GeoError> {
//! // Your `_ncfa` cookie from geoguessr.com
//! let client = GeoguessrClient::new("your_ncfa_cookie_here")?;
//!
//! // Who am I?
//! let me = client.get_all_my_info().await?;
//! println!("{}", me.profile);
//!
//! // Create a challenge, play it, and read its leaderboard
//! let link = client
//!     .generate_challenge("https://www.geoguessr.com/maps/world", &ChallengeSettings::default(), true)
//!     .await?;
//! let leaderboard = client.get_challenge_score(&link).await?;
//! println!("{} players", leaderboard.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Unbounded loops
//!
//! Pagination and replay assembly issue requests until the API says they are done.
//! Neither has a page or round cap; callers needing a bound should wrap the call in
//! a timeout.

mod client;
mod endpoints;
mod error;
mod pagination;
mod transport;

#[cfg(test)]
mod testing;

pub use client::{ChallengeSettings, GeoguessrClient, GeoguessrClientBuilder, MyInfo, RankedDuelLink};
pub use endpoints::{
    DEFAULT_BASE_URL, DEFAULT_GAME_SERVER_URL, Endpoints, duel_id_from_url, token_from_url,
};
pub use error::GeoError;
pub use transport::{HttpResponse, HttpTransport, Transport};
