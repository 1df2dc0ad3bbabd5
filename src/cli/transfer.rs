use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Config,
    error,
    error::Error,
    info,
    management::{FileTokenStore, TokenStore},
    spotify::SpotifyClient,
    success,
    transfer::{Transfer, TransferObserver, TransferStep},
    types::{TransferOutcome, TransferRequest},
    warning,
};

struct SpinnerObserver {
    pb: ProgressBar,
}

impl TransferObserver for SpinnerObserver {
    fn on_step(&self, step: &TransferStep) {
        let message = match step {
            TransferStep::ResolvingUser => "Looking up your Spotify account...".to_string(),
            TransferStep::CreatingPlaylist { name } => format!("Creating playlist \"{name}\"..."),
            TransferStep::FetchingLikedTracks => "Fetching liked songs...".to_string(),
            TransferStep::AppendingTracks { count, batches } => {
                format!("Adding {count} songs in {batches} batches...")
            }
            TransferStep::BatchAppended { written, total } => {
                format!("Added {written}/{total} songs...")
            }
        };
        self.pb.set_message(message);
    }
}

pub async fn transfer(config: Config, request: TransferRequest) {
    if let Err(e) = request.validate() {
        error!("{}", e);
    }

    let client = match SpotifyClient::new(config) {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    };
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::default_location());

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let transfer =
        Transfer::new(client, store).with_observer(Arc::new(SpinnerObserver { pb: pb.clone() }));
    let outcome = transfer
        .execute_until(&request, async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await;
    pb.finish_and_clear();

    match outcome {
        TransferOutcome::Success {
            playlist_link,
            track_count,
        } => {
            success!("Created \"{}\" with {} songs.", request.name, track_count);
            info!("{}", playlist_link);
        }
        TransferOutcome::Failure {
            error: Error::NotAuthenticated,
            ..
        } => error!("Not authenticated. Please run syncliked login"),
        TransferOutcome::Failure { error, partial } => {
            if let Some(partial) = partial {
                warning!(
                    "Playlist \"{}\" was created but is incomplete ({} songs added): {}",
                    request.name,
                    partial.tracks_written,
                    partial.playlist.url
                );
            }
            if error.is_unauthorized() {
                warning!("Spotify rejected the stored token. Please run syncliked login");
            }
            error!("{}", describe(&error));
        }
    }
}

/// Renders the error together with its underlying cause.
fn describe(error: &Error) -> String {
    match std::error::Error::source(error) {
        Some(source) => format!("{error}: {source}"),
        None => error.to_string(),
    }
}
