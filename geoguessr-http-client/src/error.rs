//! Error types for the GeoGuessr HTTP client

use geoguessr_models::ModelError;
use thiserror::Error;

/// Errors that can occur when using the GeoGuessr HTTP client
#[derive(Error, Debug)]
pub enum GeoError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid HTTP status code received
    #[error("Invalid HTTP status: {status}")]
    InvalidStatus {
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// Response body is not the JSON it should be
    #[error("Failed to decode JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Response is JSON but lacks a structure the model needs
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The users endpoint answered 404
    #[error("The ID {0} does not exist.")]
    NonExistingUser(String),

    /// Response is JSON but not of the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
