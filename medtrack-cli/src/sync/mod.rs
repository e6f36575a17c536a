//! Remote sync for CLI commands.
//!
//! Each command builds a [`SyncClient`] from the loaded config, talks to the
//! users API once, and exits. Nothing is persisted locally.

pub mod client;

pub use client::{SyncClient, SyncClientError};
