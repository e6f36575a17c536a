//! Sync module for the remote users API.
//!
//! [`UserManager`] owns the local list of people and reconciles it with a
//! JSON REST store:
//! - `POST /users` creates one person (with medications)
//! - `GET /users` returns every person, replacing the local list
//! - `DELETE /users` wipes the store, then the local list
//!
//! Every outcome is returned to the caller and also handed to a
//! [`SyncReporter`], so callers may fire and forget.

mod client;
mod error;
mod protocol;
mod report;

pub use client::{AddPersonOutcome, PushReceipt, UserManager};
pub use error::SyncError;
pub use protocol::{CreateUserResponse, PersonRecord, RemoteId};
pub use report::{SyncEvent, SyncReporter, TracingReporter};
