use reqwest::Url;
use tracing::{debug, instrument};

use crate::{
    config::{Config, SPOTIFY_SCOPE},
    error::ApiError,
    spotify::client::{SpotifyClient, parse_json},
    types::{Credential, TokenResponse},
};

/// Builds the URL the user agent is sent to for granting access.
///
/// The query carries the client id, `response_type=code`, the registered
/// redirect URI, the fixed scope set and the anti-forgery `state` value that
/// the callback must echo back.
pub fn authorize_url(config: &Config, state: &str) -> Result<String, ApiError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("scope", SPOTIFY_SCOPE),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| ApiError::Malformed(format!("authorization url: {e}")))?;

    Ok(url.into())
}

/// Exchanges a one-time authorization code for an access token.
///
/// The client credentials are sent with HTTP Basic authentication and the
/// form carries `grant_type=authorization_code`, the code and the redirect
/// URI used when the code was issued. A successful response without an
/// `access_token` is reported as [`ApiError::Malformed`].
#[instrument(skip_all)]
pub async fn exchange_code(client: &SpotifyClient, code: &str) -> Result<Credential, ApiError> {
    let config = client.config();
    debug!(url = %config.token_url, "exchanging authorization code");

    let response = client
        .http()
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let token: TokenResponse = parse_json(response).await?;

    match token.access_token {
        Some(access_token) if !access_token.is_empty() => {
            debug!(scope = ?token.scope, expires_in = ?token.expires_in, "token issued");
            Ok(Credential::new(access_token))
        }
        _ => Err(ApiError::Malformed(
            "token response has no access_token".to_string(),
        )),
    }
}
