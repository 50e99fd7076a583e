//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use geoguessr_http_client::GeoguessrClient;
use std::time::Duration;
use zeroize::Zeroizing;

/// Environment variable holding the `_ncfa` cookie
pub const NCFA_ENV: &str = "GEOGUESSR_NCFA";

/// Resolved runtime configuration
pub struct Config {
    /// `_ncfa` session cookie (zeroized on drop)
    pub ncfa: Zeroizing<String>,
    /// Web API host override
    pub base_url: Option<String>,
    /// Game server host override
    pub game_server_url: Option<String>,
    /// Request timeout
    pub timeout: Option<Duration>,
    /// JSON output
    pub json: bool,
}

impl Config {
    /// Build config from CLI args, resolving the session cookie
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        let ncfa = match std::env::var(NCFA_ENV) {
            Ok(ncfa) if !ncfa.is_empty() => Zeroizing::new(ncfa),
            _ => prompt_ncfa()?,
        };
        Ok(Self::with_ncfa(args, ncfa))
    }

    fn with_ncfa(args: &Args, ncfa: Zeroizing<String>) -> Self {
        Self {
            ncfa,
            base_url: args.base_url.clone(),
            game_server_url: args.game_server_url.clone(),
            timeout: args.timeout.map(Duration::from_secs),
            json: args.json,
        }
    }

    /// Create the API client described by this configuration
    pub fn build_client(&self) -> Result<GeoguessrClient, CliError> {
        let mut builder = GeoguessrClient::builder();
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.as_str())?;
        }
        if let Some(url) = &self.game_server_url {
            builder = builder.game_server_url(url.as_str())?;
        }
        if let Some(timeout) = self.timeout {
            builder = builder.client_builder(
                reqwest::Client::builder()
                    .timeout(timeout)
                    .use_rustls_tls(),
            );
        }
        Ok(builder.build(&self.ncfa)?)
    }
}

/// Prompt user for the session cookie
fn prompt_ncfa() -> Result<Zeroizing<String>, CliError> {
    println!("{NCFA_ENV} is not set. Copy the _ncfa cookie from geoguessr.com.");
    let ncfa = rpassword::prompt_password("Enter _ncfa cookie: ")
        .map_err(|e| CliError::Config(format!("Failed to read cookie: {e}")))?;
    if ncfa.is_empty() {
        return Err(CliError::Config("Session cookie is required.".to_string()));
    }
    Ok(Zeroizing::new(ncfa))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use proptest::prelude::*;

    fn config(argv: &[&str]) -> Config {
        let args = Args::try_parse_from(argv).unwrap();
        Config::with_ncfa(&args, Zeroizing::new("cookie".to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = config(&["geoguessr", "me"]);
        assert_eq!(config.base_url, None);
        assert_eq!(config.timeout, None);
        assert!(!config.json);

        let client = config.build_client().unwrap();
        assert_eq!(client.endpoints().base_url().as_str(), "https://www.geoguessr.com/");
    }

    #[test]
    fn test_host_overrides() {
        let config = config(&[
            "geoguessr",
            "friends",
            "--base-url",
            "http://localhost:8080",
            "--game-server-url",
            "http://localhost:8081",
            "--timeout",
            "5",
        ]);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));

        let client = config.build_client().unwrap();
        assert_eq!(client.endpoints().base_url().as_str(), "http://localhost:8080/");
        assert_eq!(client.endpoints().game_server_url().as_str(), "http://localhost:8081/");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = config(&["geoguessr", "me", "--base-url", "not a url"]);
        assert!(matches!(config.build_client(), Err(CliError::Http(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_timeout_in_seconds(secs in 1u64..3600u64) {
            let secs_arg = secs.to_string();
            let config = config(&["geoguessr", "me", "--timeout", &secs_arg]);
            prop_assert_eq!(config.timeout, Some(Duration::from_secs(secs)));
        }
    }
}
