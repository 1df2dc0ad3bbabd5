use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::debug;

use crate::{api, error::Error, management::CallbackQuery};

/// Slot the `/callback` handler fills with the first query it receives.
pub type CallbackSlot = Arc<Mutex<Option<CallbackQuery>>>;

pub fn router(slot: CallbackSlot) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(slot))
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, Error> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Config(format!("cannot bind callback server to {addr}: {e}")))
}

pub async fn start_api_server(listener: TcpListener, slot: CallbackSlot) -> Result<(), Error> {
    if let Ok(addr) = listener.local_addr() {
        debug!(%addr, "callback server listening");
    }

    axum::serve(listener, router(slot))
        .await
        .map_err(|e| Error::Config(format!("callback server stopped: {e}")))
}
