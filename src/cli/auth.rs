use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error, info,
    management::{AuthFlow, AuthState, CallbackQuery, FileTokenStore, TokenStore},
    server::{self, CallbackSlot},
    spotify::SpotifyClient,
    success, warning,
};

fn auth_flow(config: Config) -> AuthFlow {
    let client = match SpotifyClient::new(config) {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    };
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::default_location());
    AuthFlow::new(client, store)
}

pub async fn login(config: Config) {
    let server_addr = config.server_addr;
    let login_timeout = config.login_timeout;
    let flow = auth_flow(config);

    match flow.state().await {
        Ok(AuthState::LoggedIn) => {
            success!("Already logged in. Run syncliked logout to switch accounts.");
            return;
        }
        Ok(_) => {}
        Err(e) => error!("Cannot read stored token. Err: {}", e),
    }

    let listener = match server::bind(server_addr).await {
        Ok(listener) => listener,
        Err(e) => error!("{}", e),
    };

    let slot: CallbackSlot = Arc::new(Mutex::new(None));
    let server_slot = Arc::clone(&slot);
    let server = tokio::spawn(async move {
        if let Err(e) = server::start_api_server(listener, server_slot).await {
            warning!("{}", e);
        }
    });

    let auth_url = match flow.begin_login().await {
        Ok(url) => url,
        Err(e) => error!("Cannot start login. Err: {}", e),
    };

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let query = wait_for_callback(&slot, login_timeout).await;
    server.abort();

    let mut query = match query {
        Some(query) => query,
        None => error!(
            "No authorization received within {} seconds.",
            login_timeout.as_secs()
        ),
    };

    match flow.resume(&mut query).await {
        Ok(AuthState::LoggedIn) => success!("Authentication successful!"),
        Ok(state) => error!("Authentication did not complete ({:?}).", state),
        Err(e) => error!("Authentication failed. Err: {}", e),
    }
}

pub async fn logout(config: Config) {
    match auth_flow(config).logout().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Failed to remove stored token. Err: {}", e),
    }
}

pub async fn status(config: Config) {
    let store = FileTokenStore::default_location();
    info!("Token cache: {}", store.path().display());

    match auth_flow(config).state().await {
        Ok(AuthState::LoggedIn) => success!("Logged in."),
        Ok(_) => warning!("Not logged in. Run syncliked login."),
        Err(e) => error!("Cannot read stored token. Err: {}", e),
    }
}

async fn wait_for_callback(slot: &CallbackSlot, max_wait: Duration) -> Option<CallbackQuery> {
    use std::time::Instant;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for authorization in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();
    while start.elapsed() < max_wait {
        if let Some(query) = slot.lock().await.take() {
            pb.finish_and_clear();
            return Some(query);
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    pb.finish_and_clear();
    None
}
