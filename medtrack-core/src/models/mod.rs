mod capacity;
mod medication;
mod person;

pub use capacity::{CapacityError, MAX_MEDICATIONS, MAX_PEOPLE};
pub use medication::{parse_refill_date, Medication};
pub use person::Person;
