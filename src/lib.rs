//! syncliked library
//!
//! Copies a Spotify user's liked songs into a newly created playlist. The
//! library exposes the OAuth login flow, the paged liked-tracks reader, the
//! batched playlist writer and the orchestrator that ties them together.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration from the environment and `.env`
//! - `error` - Error taxonomy
//! - `management` - Token storage and the login state machine
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client
//! - `transfer` - Transfer orchestrator
//! - `types` - Domain and wire types
//! - `utils` - Small helpers
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use syncliked::{config::Config, management::FileTokenStore, spotify::SpotifyClient};
//! use syncliked::{transfer::Transfer, types::TransferRequest};
//!
//! #[tokio::main]
//! async fn main() -> syncliked::Res<()> {
//!     let client = SpotifyClient::new(Config::from_env()?)?;
//!     let transfer = Transfer::new(client, Arc::new(FileTokenStore::default_location()));
//!     let outcome = transfer.execute(&TransferRequest::new("My Liked Songs")).await;
//!     println!("{outcome}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod transfer;
pub mod types;
pub mod utils;

pub use error::{ApiError, Error};

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```ignore
/// info!("Fetching liked songs...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the binary; library code returns [`Error`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
