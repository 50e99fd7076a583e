//! Error types for model construction

use thiserror::Error;

/// Error raised when a payload cannot be turned into a model at all
///
/// Malformed or missing optional fields never produce an error; they become `None`.
/// Only structurally required pieces fail construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A required root key is absent from the payload
    #[error("Missing data: the `{0}` key is missing in the data")]
    MissingData(&'static str),

    /// A replay event carries a type tag outside the known event kinds
    #[error("Unknown replay event type: {0}")]
    UnknownReplayEvent(String),
}
