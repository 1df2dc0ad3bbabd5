//! Error types for syncliked.
//!
//! Every remote step of a transfer has its own variant so the caller can tell
//! exactly which stage failed. The underlying HTTP cause is kept as an
//! [`ApiError`] source.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call against the Spotify accounts or Web API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, timeout or body decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote answered with a non-success status code.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response was successful but lacked a required field.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Whether the remote rejected the bearer credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// The unified error type for syncliked operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The authorization code could not be exchanged for an access token.
    #[error("failed to exchange authorization code: {0}")]
    AuthExchange(#[source] ApiError),

    /// An operation needed a stored credential and none was present.
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("failed to get user information")]
    UserLookup(#[source] ApiError),

    #[error("failed to create playlist")]
    PlaylistCreate(#[source] ApiError),

    /// A liked-tracks page could not be fetched. No partial result is kept.
    #[error("failed to fetch liked songs")]
    CatalogFetch {
        offset: usize,
        #[source]
        source: ApiError,
    },

    /// A batch append failed. `written` tracks from earlier batches remain
    /// in the playlist.
    #[error("failed to add songs to playlist")]
    PlaylistWrite {
        batch: usize,
        written: usize,
        #[source]
        source: ApiError,
    },

    #[error("invalid transfer request: {0}")]
    InvalidRequest(String),

    #[error("transfer cancelled")]
    Cancelled,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("token store error: {0}")]
    TokenStore(String),
}

impl Error {
    /// Returns the remote cause, if this error came from an API call.
    pub fn api_source(&self) -> Option<&ApiError> {
        match self {
            Error::AuthExchange(source)
            | Error::UserLookup(source)
            | Error::PlaylistCreate(source)
            | Error::CatalogFetch { source, .. }
            | Error::PlaylistWrite { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether the failure was the remote rejecting the stored credential.
    pub fn is_unauthorized(&self) -> bool {
        self.api_source().is_some_and(ApiError::is_unauthorized)
    }
}
