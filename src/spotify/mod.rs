//! # Spotify Integration Module
//!
//! Thin, typed wrappers around the parts of the Spotify accounts service and
//! Web API that a liked-songs transfer needs.
//!
//! ## Architecture
//!
//! ```text
//! Transfer Orchestrator / Auth Flow
//!          ↓
//! Spotify Integration Layer
//!     ├── auth      (authorize URL, code exchange)
//!     ├── user      (GET /me)
//!     ├── library   (paged GET /me/tracks)
//!     └── playlist  (create, batched append)
//!          ↓
//! SpotifyClient (reqwest, JSON)
//! ```
//!
//! ## Request Policy
//!
//! Each remote call is attempted exactly once. Rate limiting (`429`) and
//! gateway errors surface as ordinary [`ApiError::Status`](crate::error::ApiError)
//! values; the caller decides what to do with them.
//!
//! ## Pagination and Batching
//!
//! - Liked tracks are read [`library::PAGE_SIZE`] at a time with an increasing
//!   offset.
//! - Tracks are appended [`playlist::BATCH_SIZE`] at a time, in order.

pub mod auth;
pub mod client;
pub mod library;
pub mod playlist;
pub mod user;

pub use client::SpotifyClient;
