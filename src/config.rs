//! Configuration management for syncliked.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Variables already present in the process
//! environment take precedence over the file.
//!
//! The `.env` file is looked up in:
//! - Linux: `~/.local/share/syncliked/.env`
//! - macOS: `~/Library/Application Support/syncliked/.env`
//! - Windows: `%LOCALAPPDATA%/syncliked/.env`

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::error::Error;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:3000/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 120;

/// Permissions requested during login: read the liked-tracks library and
/// write both private and public playlists.
pub const SPOTIFY_SCOPE: &str = "user-library-read playlist-modify-private playlist-modify-public";

/// Returns the directory holding the `.env` file and the token cache.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("syncliked");
    path
}

/// Loads environment variables from `syncliked/.env` in the local data directory.
///
/// Creates the directory if needed. A missing `.env` file is not an error,
/// since every value may also be provided through the real environment.
///
/// # Errors
///
/// Returns [`Error::Config`] if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), Error> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| Error::Config(e.to_string()))?;

    let path = dir.join(".env");
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no .env file found");
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    Ok(())
}

/// Runtime settings for talking to Spotify and for the local callback server.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: SocketAddr,
    /// Per-request timeout. `None` keeps the transport default.
    pub http_timeout: Option<Duration>,
    pub login_timeout: Duration,
}

impl Config {
    /// Builds a configuration with Spotify defaults for everything except the
    /// app credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            http_timeout: None,
            login_timeout: Duration::from_secs(DEFAULT_LOGIN_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET` are
    /// required; every other key falls back to its default.
    pub fn from_env() -> Result<Self, Error> {
        let server_addr = optional("SERVER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let server_addr = SocketAddr::from_str(&server_addr)
            .map_err(|e| Error::Config(format!("SERVER_ADDRESS {server_addr:?}: {e}")))?;

        let http_timeout = optional("HTTP_TIMEOUT_SECS")
            .map(|v| parse_secs("HTTP_TIMEOUT_SECS", &v))
            .transpose()?;
        let login_timeout = optional("LOGIN_TIMEOUT_SECS")
            .map(|v| parse_secs("LOGIN_TIMEOUT_SECS", &v))
            .transpose()?
            .unwrap_or(Duration::from_secs(DEFAULT_LOGIN_TIMEOUT_SECS));

        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: optional("SPOTIFY_API_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            auth_url: optional("SPOTIFY_API_AUTH_URL")
                .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: optional("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            server_addr,
            http_timeout,
            login_timeout,
        })
    }
}

fn required(key: &str) -> Result<String, Error> {
    optional(key).ok_or_else(|| Error::Config(format!("{key} must be set")))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, Error> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| Error::Config(format!("{key} {value:?}: {e}")))
}
