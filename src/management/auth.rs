use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{ApiError, Error},
    management::TokenStore,
    spotify::{self, SpotifyClient},
    types::Credential,
    utils,
};

/// Where the login flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    /// The user was sent to the authorization page and no callback has been
    /// handled yet.
    PendingCallback,
    LoggedIn,
}

/// Parameters the authorization authority appended to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl CallbackQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            code: params.get("code").cloned(),
            state: params.get("state").cloned(),
            error: params.get("error").cloned(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.error.is_none()
    }
}

/// Drives the OAuth authorization-code flow and owns writes to the token store.
pub struct AuthFlow {
    client: SpotifyClient,
    store: Arc<dyn TokenStore>,
    expected_state: Mutex<Option<String>>,
}

impl AuthFlow {
    pub fn new(client: SpotifyClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            expected_state: Mutex::new(None),
        }
    }

    /// Starts a login and returns the URL the user agent must visit.
    ///
    /// A fresh anti-forgery `state` is generated for every call; only the
    /// latest one is accepted by [`resume`](Self::resume).
    pub async fn begin_login(&self) -> Result<String, Error> {
        let state = utils::generate_state();
        let url = spotify::auth::authorize_url(self.client.config(), &state)
            .map_err(|e| Error::Config(e.to_string()))?;

        *self.expected_state.lock().await = Some(state);
        debug!("login started");
        Ok(url)
    }

    /// Exchanges an authorization code and stores the resulting credential.
    ///
    /// On failure the token store is left untouched and the flow returns to
    /// [`AuthState::LoggedOut`].
    pub async fn complete_login(&self, code: &str) -> Result<Credential, Error> {
        self.expected_state.lock().await.take();

        let credential = spotify::auth::exchange_code(&self.client, code)
            .await
            .map_err(|e| {
                warn!(error = %e, "token exchange failed");
                Error::AuthExchange(e)
            })?;

        self.store.save(&credential).await?;
        info!("logged in");
        Ok(credential)
    }

    /// Handles a pending callback, if there is one.
    ///
    /// With a credential already stored this is a no-op reporting
    /// [`AuthState::LoggedIn`]. Otherwise the authorization code is taken out
    /// of `query` and exchanged, so calling this again without a new code
    /// never triggers a second exchange.
    ///
    /// # Errors
    ///
    /// [`Error::AuthExchange`] when the authority reported an error, the
    /// `state` does not match the one issued by
    /// [`begin_login`](Self::begin_login), or the exchange itself fails.
    pub async fn resume(&self, query: &mut CallbackQuery) -> Result<AuthState, Error> {
        if self.store.load().await?.is_some() {
            return Ok(AuthState::LoggedIn);
        }

        if let Some(error) = query.error.take() {
            query.code = None;
            self.expected_state.lock().await.take();
            return Err(Error::AuthExchange(ApiError::Malformed(format!(
                "authorization denied: {error}"
            ))));
        }

        let Some(code) = query.code.take() else {
            return self.state().await;
        };

        let expected = self.expected_state.lock().await.clone();
        if let Some(expected) = expected {
            if query.state.as_deref() != Some(expected.as_str()) {
                self.expected_state.lock().await.take();
                return Err(Error::AuthExchange(ApiError::Malformed(
                    "callback state does not match the login request".to_string(),
                )));
            }
        }

        self.complete_login(&code).await?;
        Ok(AuthState::LoggedIn)
    }

    /// Forgets the stored credential. Safe to call when already logged out.
    pub async fn logout(&self) -> Result<(), Error> {
        self.expected_state.lock().await.take();
        self.store.clear().await?;
        info!("logged out");
        Ok(())
    }

    pub async fn state(&self) -> Result<AuthState, Error> {
        if self.store.load().await?.is_some() {
            return Ok(AuthState::LoggedIn);
        }

        if self.expected_state.lock().await.is_some() {
            Ok(AuthState::PendingCallback)
        } else {
            Ok(AuthState::LoggedOut)
        }
    }
}
