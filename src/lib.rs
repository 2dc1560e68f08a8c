//! Score tracking service and client.
//!
//! The [`server`] module hosts the authoritative [`score::ScoreStore`] behind a
//! small JSON API. The [`client`] module talks to that API and falls back to a
//! local key-value store when the server cannot be reached.

pub mod client;
pub mod config;
pub mod score;
pub mod server;
pub mod view;
