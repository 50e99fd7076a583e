//! GeoGuessr CLI - Command-line interface for the GeoGuessr API client

mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use cli::{Args, Command};
use config::Config;
use error::CliError;
use geoguessr_http_client::{ChallengeSettings, GeoguessrClient};
use output::OutputFormatter;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoguessr_http_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(&args)?;
    let client = config.build_client()?;
    let output = OutputFormatter::new(config.json);
    debug!(command = ?args.command, base_url = %client.endpoints().base_url(), "running");

    let result = dispatch(&client, &output, args.command).await;
    client.close();
    result
}

async fn dispatch(
    client: &GeoguessrClient,
    output: &OutputFormatter,
    command: Command,
) -> Result<(), CliError> {
    match command {
        Command::MyId => output.print("id", &client.get_my_id().await?),
        Command::Me => output.print("me", &client.get_all_my_info().await?),
        Command::Profile { user_id } => output.print("profile", &client.get_profile(&user_id).await?),
        Command::Stats { user_id } => output.print("stats", &client.get_stats(&user_id).await?),
        Command::Elo { user_id } => output.print("elo", &client.get_elo(&user_id).await?),
        Command::Friends => output.print("friends", &client.get_friends().await?),
        Command::Activities => output.print("activities", &client.get_activities().await?),
        Command::RankedDuels => {
            output.print("rankedDuels", &client.get_ranked_duel_activity().await?)
        }
        Command::Challenge { url } => {
            output.print("challenge", &client.get_challenge_info(&url).await?)
        }
        Command::Score { url } => output.print("leaderboard", &client.get_challenge_score(&url).await?),
        Command::Play { url } => {
            client.play_challenge(&url).await?;
            output.print("played", &url)
        }
        Command::Generate {
            map_url,
            no_move,
            no_pan,
            no_zoom,
            time_limit,
            no_play,
        } => {
            let settings = ChallengeSettings {
                can_move: !no_move,
                can_pan: !no_pan,
                can_zoom: !no_zoom,
                time_limit,
            };
            let link = client.generate_challenge(&map_url, &settings, !no_play).await?;
            output.print("challenge", &link)
        }
        Command::Map { url } => output.print("map", &client.get_map_info(&url).await?),
        Command::Duel { url, replays } => {
            let mut duel = client.get_duel_info(&url).await?;
            if replays {
                client.set_replays(&mut duel).await?;
            }
            output.print("duel", &duel)
        }
    }
}
