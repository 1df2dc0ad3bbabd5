use chrono::{NaiveDate, Utc};
use tracing::{debug, instrument};

use crate::{
    error::{ApiError, Error},
    spotify::client::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, Credential, PlaylistHandle, TrackReference, UserIdentity,
    },
};

/// Maximum number of URIs accepted by one append request.
pub const BATCH_SIZE: usize = 100;

pub fn playlist_description(date: NaiveDate) -> String {
    format!("Auto-created from Liked Songs on {}", date.format("%Y-%m-%d"))
}

/// Creates an empty playlist owned by `owner`.
///
/// The description is stamped with today's date. The returned handle carries
/// the playlist id and its public Spotify URL.
#[instrument(skip(client, credential, owner), fields(owner = %owner.id))]
pub async fn create_playlist(
    client: &SpotifyClient,
    credential: &Credential,
    owner: &UserIdentity,
    name: &str,
    public: bool,
) -> Result<PlaylistHandle, Error> {
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: playlist_description(Utc::now().date_naive()),
        public,
    };

    let created: CreatePlaylistResponse = client
        .post_json(&format!("users/{}/playlists", owner.id), &body, credential)
        .await
        .map_err(Error::PlaylistCreate)?;

    let url = created.external_urls.spotify.ok_or_else(|| {
        Error::PlaylistCreate(ApiError::Malformed(
            "playlist response has no external url".to_string(),
        ))
    })?;

    debug!(id = %created.id, name = %created.name, "playlist created");
    Ok(PlaylistHandle {
        id: created.id,
        url,
    })
}

/// Appends `references` to the playlist in order, in batches of [`BATCH_SIZE`].
///
/// Returns the number of tracks written. Batches are sent one after another;
/// the first rejected batch stops the operation. Earlier batches are already
/// committed on the remote and are not rolled back, so the error reports how
/// many tracks made it in.
pub async fn append_tracks(
    client: &SpotifyClient,
    credential: &Credential,
    playlist: &PlaylistHandle,
    references: &[TrackReference],
) -> Result<usize, Error> {
    append_tracks_with_progress(client, credential, playlist, references, &mut |_: usize| {})
        .await
}

/// Same as [`append_tracks`], calling `on_batch` with the running total of
/// written tracks after every committed batch.
#[instrument(skip(client, credential, playlist, references, on_batch), fields(playlist = %playlist.id, count = references.len()))]
pub async fn append_tracks_with_progress(
    client: &SpotifyClient,
    credential: &Credential,
    playlist: &PlaylistHandle,
    references: &[TrackReference],
    on_batch: &mut (dyn FnMut(usize) + Send),
) -> Result<usize, Error> {
    let path = format!("playlists/{}/tracks", playlist.id);
    let mut written = 0;

    for (batch, chunk) in references.chunks(BATCH_SIZE).enumerate() {
        let response: AddTrackToPlaylistResponse = client
            .post_json(&path, &AddTrackToPlaylistRequest { uris: chunk }, credential)
            .await
            .map_err(|source| Error::PlaylistWrite {
                batch,
                written,
                source,
            })?;

        written += chunk.len();
        debug!(batch, size = chunk.len(), snapshot = %response.snapshot_id, "batch appended");
        on_batch(written);
    }

    Ok(written)
}
