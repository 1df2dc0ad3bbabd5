//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the OAuth
//! redirect during `syncliked login`.
//!
//! - [`callback`] - stores the `code`/`state`/`error` query of the redirect so
//!   the login command can complete the exchange.
//! - [`health`] - status and version, handy for checking the redirect target
//!   is reachable.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
