//! # CLI Module
//!
//! User-facing commands of syncliked. Each command loads what it needs
//! (token store, Spotify client), delegates to the library and reports the
//! result with the `info!`/`success!`/`warning!`/`error!` macros.
//!
//! ## Commands
//!
//! - [`login`] - OAuth authorization-code login through the browser
//! - [`logout`] - Removes the stored token
//! - [`status`] - Shows whether a token is stored
//! - [`transfer`] - Copies liked songs into a new playlist
//!
//! ## Usage
//!
//! ```bash
//! syncliked login
//! syncliked transfer --name "My Liked Songs" --limit 200
//! syncliked logout
//! ```

mod auth;
mod transfer;

pub use auth::login;
pub use auth::logout;
pub use auth::status;
pub use transfer::transfer;
