use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::{
    error::Error,
    spotify::client::SpotifyClient,
    types::{CollectionPage, Credential, SavedTracksResponse, TrackReference},
};

/// Maximum page size accepted by the saved-tracks endpoint.
pub const PAGE_SIZE: usize = 50;

/// Walks the liked-tracks collection page by page, most recently liked first.
///
/// Pagination ends after a page shorter than [`PAGE_SIZE`]. The pager is not
/// restartable; once exhausted, [`next_page`](Self::next_page) keeps
/// returning `None`.
pub struct LikedTracksPager<'a> {
    client: &'a SpotifyClient,
    credential: &'a Credential,
    offset: usize,
    done: bool,
}

impl<'a> LikedTracksPager<'a> {
    pub fn new(client: &'a SpotifyClient, credential: &'a Credential) -> Self {
        Self {
            client,
            credential,
            offset: 0,
            done: false,
        }
    }

    /// Fetches the next page, or `None` once the last page has been read.
    ///
    /// # Errors
    ///
    /// Any non-success response yields [`Error::CatalogFetch`] carrying the
    /// offset of the failed page.
    pub async fn next_page(&mut self) -> Result<Option<CollectionPage>, Error> {
        if self.done {
            return Ok(None);
        }

        let offset = self.offset;
        let response: SavedTracksResponse = self
            .client
            .get_json(
                "me/tracks",
                &[
                    ("limit", PAGE_SIZE.to_string()),
                    ("offset", offset.to_string()),
                ],
                self.credential,
            )
            .await
            .map_err(|source| Error::CatalogFetch { offset, source })?;

        let received = response.items.len();
        let has_more = received >= PAGE_SIZE;
        let items: Vec<TrackReference> = response
            .items
            .into_iter()
            .filter_map(|saved| saved.track)
            .map(|track| TrackReference::new(track.uri))
            .collect();

        if items.len() < received {
            debug!(offset, skipped = received - items.len(), "skipped unavailable tracks");
        }
        debug!(offset, received, total = ?response.total, "fetched liked tracks page");

        self.offset += PAGE_SIZE;
        self.done = !has_more;

        Ok(Some(CollectionPage {
            items,
            offset,
            has_more,
        }))
    }
}

/// Retrieves the whole liked-tracks collection, or its first `limit` entries.
///
/// Pages are requested at offsets 0, 50, 100, … until a short page arrives or
/// the accumulated count reaches `limit`; the result is then truncated to
/// exactly `limit`. A failed page aborts the whole read and nothing is
/// returned.
#[instrument(skip(client, credential))]
pub async fn fetch_liked_tracks(
    client: &SpotifyClient,
    credential: &Credential,
    limit: Option<NonZeroUsize>,
) -> Result<Vec<TrackReference>, Error> {
    let mut pager = LikedTracksPager::new(client, credential);
    let mut tracks: Vec<TrackReference> = Vec::new();

    while let Some(page) = pager.next_page().await? {
        tracks.extend(page.items);

        if let Some(limit) = limit {
            if tracks.len() >= limit.get() {
                tracks.truncate(limit.get());
                break;
            }
        }
    }

    debug!(count = tracks.len(), "liked tracks collected");
    Ok(tracks)
}
