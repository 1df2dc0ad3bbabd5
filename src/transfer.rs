//! Transfer orchestration.
//!
//! A transfer runs strictly in sequence: resolve the user, create the
//! playlist, read the liked tracks, append them. The first failing step ends
//! the run. Nothing is retried and nothing is rolled back: a playlist that was
//! already created stays on the remote and is reported as incomplete.

use std::{future::Future, sync::Arc, sync::Mutex};

use tracing::{debug, instrument, warn};

use crate::{
    error::Error,
    management::TokenStore,
    spotify::{self, SpotifyClient, playlist::BATCH_SIZE},
    types::{PartialTransfer, TransferOutcome, TransferRequest},
    utils,
};

/// Progress events emitted while a transfer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStep {
    ResolvingUser,
    CreatingPlaylist { name: String },
    FetchingLikedTracks,
    AppendingTracks { count: usize, batches: usize },
    BatchAppended { written: usize, total: usize },
}

/// Receives [`TransferStep`]s, e.g. to drive a progress indicator.
pub trait TransferObserver: Send + Sync {
    fn on_step(&self, step: &TransferStep);
}

pub struct Transfer {
    client: SpotifyClient,
    store: Arc<dyn TokenStore>,
    observer: Option<Arc<dyn TransferObserver>>,
}

impl Transfer {
    pub fn new(client: SpotifyClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn TransferObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Runs one transfer to completion.
    pub async fn execute(&self, request: &TransferRequest) -> TransferOutcome {
        self.execute_until(request, std::future::pending::<()>()).await
    }

    /// Runs one transfer, abandoning it as soon as `cancel` resolves.
    ///
    /// A cancelled run yields [`Error::Cancelled`]. Requests already accepted
    /// by the remote are not undone.
    #[instrument(skip_all, fields(name = %request.name, public = request.public, limit = ?request.limit))]
    pub async fn execute_until<F>(&self, request: &TransferRequest, cancel: F) -> TransferOutcome
    where
        F: Future<Output = ()>,
    {
        let progress: Mutex<Option<PartialTransfer>> = Mutex::new(None);

        let result = tokio::select! {
            result = self.run(request, &progress) => result,
            _ = cancel => Err(Error::Cancelled),
        };

        match result {
            Ok((playlist_link, track_count)) => TransferOutcome::Success {
                playlist_link,
                track_count,
            },
            Err(error) => {
                if error.is_unauthorized() {
                    warn!("credential rejected by the remote, discarding it");
                    if let Err(e) = self.store.clear().await {
                        warn!(error = %e, "failed to discard rejected credential");
                    }
                }

                let partial = progress.lock().ok().and_then(|mut p| p.take());
                debug!(error = %error, partial = ?partial, "transfer failed");
                TransferOutcome::Failure { error, partial }
            }
        }
    }

    async fn run(
        &self,
        request: &TransferRequest,
        progress: &Mutex<Option<PartialTransfer>>,
    ) -> Result<(String, usize), Error> {
        request.validate()?;
        let credential = self.store.load().await?.ok_or(Error::NotAuthenticated)?;

        self.notify(TransferStep::ResolvingUser);
        let user = spotify::user::current_user(&self.client, &credential)
            .await
            .map_err(Error::UserLookup)?;

        self.notify(TransferStep::CreatingPlaylist {
            name: request.name.clone(),
        });
        let playlist = spotify::playlist::create_playlist(
            &self.client,
            &credential,
            &user,
            &request.name,
            request.public,
        )
        .await?;
        if let Ok(mut p) = progress.lock() {
            *p = Some(PartialTransfer {
                playlist: playlist.clone(),
                tracks_written: 0,
            });
        }

        self.notify(TransferStep::FetchingLikedTracks);
        let references =
            spotify::library::fetch_liked_tracks(&self.client, &credential, request.limit).await?;

        let total = references.len();
        self.notify(TransferStep::AppendingTracks {
            count: total,
            batches: utils::batch_count(total, BATCH_SIZE),
        });
        let written = spotify::playlist::append_tracks_with_progress(
            &self.client,
            &credential,
            &playlist,
            &references,
            &mut |written: usize| {
                if let Ok(mut p) = progress.lock() {
                    if let Some(partial) = p.as_mut() {
                        partial.tracks_written = written;
                    }
                }
                self.notify(TransferStep::BatchAppended { written, total });
            },
        )
        .await?;

        Ok((playlist.url, written))
    }

    fn notify(&self, step: TransferStep) {
        if let Some(observer) = &self.observer {
            observer.on_step(&step);
        }
    }
}
