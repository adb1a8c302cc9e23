//! Plexvoice Error Types
//!
//! Centralized error handling for the dispatch pipeline.

use thiserror::Error;

/// Central error type for plexvoice
#[derive(Error, Debug)]
pub enum PlexError {
    /// No device could be targeted (explicit name missed, or no usable
    /// default and zero/multiple candidates).
    #[error("no device: {0}")]
    DeviceNotFound(String),

    /// The catalog search returned nothing matching the request.
    #[error("no matching media: {0}")]
    MediaNotFound(String),

    /// The server-side play queue came back empty.
    #[error("could not build queue: {0}")]
    QueueBuildFailed(String),

    /// The verb is not one of the supported actions.
    #[error("unrecognized action: {0}")]
    UnrecognizedAction(String),

    /// The external call itself failed (network/auth/5xx).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for plexvoice operations
pub type PlexResult<T> = Result<T, PlexError>;

impl From<reqwest::Error> for PlexError {
    fn from(err: reqwest::Error) -> Self {
        PlexError::Transport(err.to_string())
    }
}
