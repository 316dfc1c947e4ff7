//! Cover art loading for review cards.
//!
//! Covers come from `http(s)://` URLs or local paths. Loading is async and
//! bounded by a timeout; any failure yields a placeholder outcome so the card
//! still renders.

pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;

pub use config::LoaderConfig;
pub use error::CoverLoadFailure;
pub use fetch::{CoverFetch, HttpFetch};
pub use loader::{CoverLoader, CoverOutcome};
