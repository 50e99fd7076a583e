//! Basic usage example for the GeoGuessr HTTP client
//!
//! This example demonstrates how to:
//! - Create a client with default settings
//! - Create a client with custom hosts (for testing)
//! - Load the authenticated account
//! - Read the settings and leaderboard of a challenge
//!
//! Note: This example requires a valid `_ncfa` cookie to run.
//! You can get it from your browser's cookies after logging in to geoguessr.com

use geoguessr_http_client::{GeoguessrClient, GeoError};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ncfa = std::env::var("GEOGUESSR_NCFA")?;

    println!("=== Example 1: Default Client ===");
    let client = GeoguessrClient::new(&ncfa)?;
    println!("✓ Client created for {}", client.endpoints().base_url());

    println!("\n=== Example 2: Custom Hosts ===");
    let _custom_client = GeoguessrClient::builder()
        .base_url("https://www.geoguessr.com")? // Could be a mock server URL for testing
        .game_server_url("https://game-server.geoguessr.com")?
        .client_builder(reqwest::Client::builder().timeout(Duration::from_secs(30)))
        .build(&ncfa)?;
    println!("✓ Client created with custom hosts and a 30s timeout");

    println!("\n=== Example 3: My Account ===");
    let id = client.get_my_id().await?;
    match client.get_profile(&id).await {
        Ok(profile) => println!("{profile}"),
        Err(GeoError::NonExistingUser(id)) => println!("✗ {id} vanished"),
        Err(e) => return Err(e.into()),
    }
    match client.get_elo(&id).await? {
        Some(elo) => println!("Rating: {:?}", elo.rating),
        None => println!("No ranked history"),
    }

    if let Some(challenge) = std::env::args().nth(1) {
        println!("\n=== Example 4: Challenge {challenge} ===");
        let info = client.get_challenge_info(&challenge).await?;
        println!("Mode: {}", info.challenge.game_mode);
        let leaderboard = client.get_challenge_score(&challenge).await?;
        for result in &leaderboard.results {
            println!(
                "{:<24} {:?}",
                result.player.nick.as_deref().unwrap_or("?"),
                result.player_total.total_score.amount
            );
        }
    }

    client.close();
    Ok(())
}
