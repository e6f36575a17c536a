use serde::Serialize;
use std::fmt;

use super::capacity::{CapacityError, MAX_MEDICATIONS};
use super::medication::Medication;

/// One individual and the medications they take.
///
/// The medication list is append-only and never holds more than
/// [`MAX_MEDICATIONS`] entries.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Person {
    pub name: String,
    medications: Vec<Medication>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            medications: Vec::new(),
        }
    }

    /// Appends a medication unless the list is already full.
    ///
    /// A full list is left untouched and a warning naming this person is logged.
    pub fn add_medication(&mut self, medication: Medication) -> Result<(), CapacityError> {
        if self.medications.len() >= MAX_MEDICATIONS {
            tracing::warn!(
                "{} already has {} medications, not adding '{}'",
                self.name,
                MAX_MEDICATIONS,
                medication.name
            );
            return Err(CapacityError::Medications {
                person: self.name.clone(),
                medication: medication.name,
            });
        }

        self.medications.push(medication);
        Ok(())
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn medication(&self, name: &str) -> Option<&Medication> {
        self.medications.iter().find(|m| m.name == name)
    }

    /// Marks the first medication with this name as taken.
    ///
    /// Returns false when the person has no such medication.
    pub fn take_medication(&mut self, name: &str) -> bool {
        match self.medications.iter_mut().find(|m| m.name == name) {
            Some(medication) => {
                medication.mark_as_taken();
                true
            }
            None => false,
        }
    }

    /// Clears the taken flag on every medication, e.g. at the start of a day.
    pub fn reset_all_taken(&mut self) {
        for medication in &mut self.medications {
            medication.reset_taken_status();
        }
    }

    /// Numbered medication listing, one line per medication.
    pub fn medication_report(&self) -> String {
        self.to_string()
    }

    /// Emits the medication listing to the log.
    pub fn list_medications(&self) {
        tracing::info!("{}", self.medication_report().trim_end());
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Medications for {}:", self.name)?;

        if self.medications.is_empty() {
            writeln!(f, "  No medications.")?;
        }

        for (i, medication) in self.medications.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, medication)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alex_with_five() -> Person {
        let mut person = Person::new("Alex");
        for (name, freq) in [
            ("Aspirin", 2),
            ("Vitamin D", 1),
            ("Metformin", 2),
            ("Lisinopril", 1),
            ("Omeprazole", 1),
        ] {
            person.add_medication(Medication::new(name, freq)).unwrap();
        }
        person
    }

    #[test]
    fn test_person_new() {
        let person = Person::new("Alex");
        assert_eq!(person.name, "Alex");
        assert!(person.medications().is_empty());
    }

    #[test]
    fn test_add_medication_preserves_order() {
        let person = alex_with_five();
        let names: Vec<&str> = person.medications().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            ["Aspirin", "Vitamin D", "Metformin", "Lisinopril", "Omeprazole"]
        );
    }

    #[test]
    fn test_sixth_medication_is_rejected() {
        let mut person = alex_with_five();

        let result = person.add_medication(Medication::new("Atorvastatin", 1));
        assert_eq!(
            result,
            Err(CapacityError::Medications {
                person: "Alex".to_string(),
                medication: "Atorvastatin".to_string(),
            })
        );
        assert_eq!(person.medications().len(), 5);
        assert!(person.medication("Atorvastatin").is_none());

        // Every further attempt is rejected the same way
        assert!(person.add_medication(Medication::new("Other", 1)).is_err());
        assert_eq!(person.medications().len(), 5);
    }

    #[test]
    fn test_count_matches_calls_up_to_capacity() {
        for calls in 0..=MAX_MEDICATIONS {
            let mut person = Person::new("Sam");
            for i in 0..calls {
                person
                    .add_medication(Medication::new(format!("med{}", i), 1))
                    .unwrap();
            }
            assert_eq!(person.medications().len(), calls);
        }
    }

    #[test]
    fn test_take_and_reset_medications() {
        let mut person = alex_with_five();

        assert!(person.take_medication("Metformin"));
        assert!(person.medication("Metformin").unwrap().taken);
        assert!(!person.medication("Aspirin").unwrap().taken);
        assert!(!person.take_medication("Ibuprofen"));

        person.reset_all_taken();
        assert!(person.medications().iter().all(|m| !m.taken));
    }

    #[test]
    fn test_medication_report() {
        let mut person = Person::new("Alex");
        person
            .add_medication(Medication::new("Aspirin", 2).with_refill_date_str("2024-05-01"))
            .unwrap();
        person
            .add_medication(
                Medication::new("Vitamin D", 1)
                    .with_taken(true)
                    .with_refill_date_str("2024-07-15T10:00:00Z"),
            )
            .unwrap();

        let report = person.medication_report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            [
                "Medications for Alex:",
                "  1. Aspirin - 2x/day - taken: no - refill: 2024-05-01",
                "  2. Vitamin D - 1x/day - taken: yes - refill: 2024-07-15",
            ]
        );
    }

    #[test]
    fn test_empty_report() {
        let person = Person::new("Sam");
        assert!(person.medication_report().contains("No medications."));
    }

    #[test]
    fn test_person_serializes_to_payload_shape() {
        let mut person = Person::new("Sam");
        person
            .add_medication(Medication::new("X", 1).with_refill_date_str("2024-01-01"))
            .unwrap();

        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Sam",
                "medications": [{
                    "name": "X",
                    "frequencyPerDay": 1,
                    "taken": false,
                    "refillDate": "2024-01-01T00:00:00.000Z"
                }]
            })
        );
    }
}
