//! medtrack Core Library
//!
//! People, their medications, and the client that syncs them with the
//! remote users API.

pub mod models;
pub mod sync;

pub use models::{
    parse_refill_date, CapacityError, Medication, Person, MAX_MEDICATIONS, MAX_PEOPLE,
};
pub use sync::{
    AddPersonOutcome, PushReceipt, SyncError, SyncEvent, SyncReporter, TracingReporter,
    UserManager,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
