use thiserror::Error;

/// Most medications one person can hold.
pub const MAX_MEDICATIONS: usize = 5;

/// Most people one user manager can hold through local adds.
pub const MAX_PEOPLE: usize = 5;

/// A guarded no-op: the list was full and the new entry was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("{person} already has {} medications; '{medication}' was not added", MAX_MEDICATIONS)]
    Medications { person: String, medication: String },

    #[error("Cannot add more than {} people; '{person}' was not added", MAX_PEOPLE)]
    People { person: String },
}
