use std::{fmt, num::NonZeroUsize};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Opaque bearer token issued by the Spotify accounts service.
///
/// No expiry is tracked: the credential is considered valid until a request
/// using it is rejected with `401 Unauthorized`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Credential as persisted by the file token store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: Credential,
    pub obtained_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
}

/// A `spotify:track:…` URI naming one track in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackReference(String);

impl TrackReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of the liked-tracks collection.
#[derive(Debug, Clone)]
pub struct CollectionPage {
    pub items: Vec<TrackReference>,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistHandle {
    pub id: String,
    pub url: String,
}

/// User supplied parameters of a single transfer.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub name: String,
    pub public: bool,
    pub limit: Option<NonZeroUsize>,
}

impl TransferRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public: false,
            limit: None,
        }
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn limit(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "playlist name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// What was left behind on the remote when a transfer failed after the
/// playlist had been created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialTransfer {
    pub playlist: PlaylistHandle,
    pub tracks_written: usize,
}

/// The single result of a transfer run.
#[derive(Debug)]
pub enum TransferOutcome {
    Success {
        playlist_link: String,
        track_count: usize,
    },
    Failure {
        error: Error,
        partial: Option<PartialTransfer>,
    },
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Success { .. })
    }

    /// Short reason string for a failed run, `None` on success.
    pub fn reason(&self) -> Option<String> {
        match self {
            TransferOutcome::Success { .. } => None,
            TransferOutcome::Failure { error, .. } => Some(error.to_string()),
        }
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOutcome::Success {
                playlist_link,
                track_count,
            } => write!(f, "copied {track_count} songs to {playlist_link}"),
            TransferOutcome::Failure {
                error,
                partial: None,
            } => write!(f, "{error}"),
            TransferOutcome::Failure {
                error,
                partial: Some(partial),
            } => write!(
                f,
                "{error}; playlist created but incomplete ({} songs added): {}",
                partial.tracks_written, partial.playlist.url
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTracksResponse {
    pub items: Vec<SavedTrack>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTrack {
    pub added_at: Option<String>,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTrackToPlaylistRequest<'a> {
    pub uris: &'a [TrackReference],
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
