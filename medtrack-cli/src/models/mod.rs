mod medication_arg;

pub use medication_arg::MedicationArg;
