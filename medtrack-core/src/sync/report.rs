//! Observable outcomes of sync operations.
//!
//! Every capacity rejection and remote success or failure is handed to a
//! [`SyncReporter`]. The default [`TracingReporter`] writes them to the log;
//! callers can install their own reporter to react to or record them.

use std::fmt;

use crate::models::{MAX_MEDICATIONS, MAX_PEOPLE};

/// Something the user manager did or failed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// `add_person` was called with the people list already full
    PersonRejected { person: String },
    /// A loaded record carried more medications than a person can hold
    MedicationRejected { person: String, medication: String },
    /// `POST /users` succeeded
    PushSucceeded {
        person: String,
        user_id: Option<String>,
    },
    /// `POST /users` failed
    PushFailed { person: String, error: String },
    /// `GET /users` succeeded and replaced the local list
    Loaded { count: usize },
    /// `GET /users` failed; the local list was kept
    LoadFailed { error: String },
    /// `DELETE /users` succeeded and the local list was emptied
    Cleared,
    /// `DELETE /users` failed; the local list was kept
    ClearFailed { error: String },
}

impl SyncEvent {
    /// True for rejections and remote failures.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            SyncEvent::PushSucceeded { .. } | SyncEvent::Loaded { .. } | SyncEvent::Cleared
        )
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::PersonRejected { person } => {
                write!(
                    f,
                    "Cannot add more than {} people, '{}' not added",
                    MAX_PEOPLE, person
                )
            }
            SyncEvent::MedicationRejected { person, medication } => write!(
                f,
                "{} already has {} medications, '{}' dropped",
                person, MAX_MEDICATIONS, medication
            ),
            SyncEvent::PushSucceeded {
                person,
                user_id: Some(id),
            } => write!(f, "Saved {} to server (id {})", person, id),
            SyncEvent::PushSucceeded {
                person,
                user_id: None,
            } => write!(f, "Saved {} to server", person),
            SyncEvent::PushFailed { person, error } => {
                write!(f, "Failed to save {} to server: {}", person, error)
            }
            SyncEvent::Loaded { count } => write!(f, "Loaded {} person(s) from server", count),
            SyncEvent::LoadFailed { error } => {
                write!(f, "Failed to load people from server: {}", error)
            }
            SyncEvent::Cleared => write!(f, "Cleared all data on server"),
            SyncEvent::ClearFailed { error } => {
                write!(f, "Failed to clear data on server: {}", error)
            }
        }
    }
}

/// Receives every [`SyncEvent`] a user manager emits.
pub trait SyncReporter: Send + Sync {
    fn report(&self, event: &SyncEvent);
}

impl<F> SyncReporter for F
where
    F: Fn(&SyncEvent) + Send + Sync,
{
    fn report(&self, event: &SyncEvent) {
        self(event)
    }
}

/// Default reporter: logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl SyncReporter for TracingReporter {
    fn report(&self, event: &SyncEvent) {
        match event {
            SyncEvent::PersonRejected { .. } | SyncEvent::MedicationRejected { .. } => {
                tracing::warn!("{}", event)
            }
            SyncEvent::PushFailed { .. }
            | SyncEvent::LoadFailed { .. }
            | SyncEvent::ClearFailed { .. } => tracing::error!("{}", event),
            _ => tracing::info!("{}", event),
        }
    }
}
