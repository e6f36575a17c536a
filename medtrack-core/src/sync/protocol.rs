//! Wire types for the remote users API.
//!
//! Outgoing payloads are plain [`Person`] values; these types cover what the
//! server sends back. Field names use camelCase to match the JSON API.

use serde::Deserialize;
use std::fmt;

use crate::models::{CapacityError, Medication, Person};

/// One person as returned by `GET /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    #[serde(default)]
    pub medications: Option<Vec<Medication>>,
}

impl PersonRecord {
    /// Rebuilds a fresh [`Person`], attaching medications through the
    /// capacity-checked add path. Every rejected medication is handed to
    /// `on_rejected`.
    pub fn into_person(self, mut on_rejected: impl FnMut(CapacityError)) -> Person {
        let mut person = Person::new(self.name);

        for medication in self.medications.unwrap_or_default() {
            if let Err(e) = person.add_medication(medication) {
                on_rejected(e);
            }
        }

        person
    }
}

/// Body of a successful `POST /users`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    #[serde(default, alias = "id")]
    pub user_id: Option<RemoteId>,
}

/// Identifier assigned by the server; either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Number(n) => write!(f, "{}", n),
            RemoteId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_record_into_person() {
        let json = r#"{"name":"Sam","medications":[{"name":"X","frequencyPerDay":1,"taken":false,"refillDate":"2024-01-01T00:00:00.000Z"}]}"#;
        let record: PersonRecord = serde_json::from_str(json).unwrap();

        let mut rejected = Vec::new();
        let person = record.into_person(|e| rejected.push(e));

        assert_eq!(person.name, "Sam");
        assert_eq!(person.medications().len(), 1);
        assert_eq!(person.medications()[0].name, "X");
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_person_record_truncates_to_capacity() {
        let meds: Vec<serde_json::Value> = (0..7)
            .map(|i| serde_json::json!({"name": format!("med{}", i), "frequencyPerDay": 1}))
            .collect();
        let json = serde_json::json!({"name": "Robin", "medications": meds});
        let record: PersonRecord = serde_json::from_value(json).unwrap();

        let mut rejected = Vec::new();
        let person = record.into_person(|e| rejected.push(e));

        assert_eq!(person.medications().len(), 5);
        assert_eq!(person.medications()[4].name, "med4");
        assert_eq!(
            rejected,
            vec![
                CapacityError::Medications {
                    person: "Robin".into(),
                    medication: "med5".into(),
                },
                CapacityError::Medications {
                    person: "Robin".into(),
                    medication: "med6".into(),
                },
            ]
        );
    }

    #[test]
    fn test_person_record_without_medications() {
        let record: PersonRecord = serde_json::from_str(r#"{"name":"Kim"}"#).unwrap();
        assert!(record.into_person(|_| {}).medications().is_empty());

        let record: PersonRecord =
            serde_json::from_str(r#"{"name":"Kim","medications":null}"#).unwrap();
        assert!(record.into_person(|_| {}).medications().is_empty());
    }

    #[test]
    fn test_create_user_response_variants() {
        let resp: CreateUserResponse = serde_json::from_str(r#"{"userId":"abc"}"#).unwrap();
        assert_eq!(resp.user_id, Some(RemoteId::Text("abc".into())));

        let resp: CreateUserResponse = serde_json::from_str(r#"{"id":7,"name":"Sam"}"#).unwrap();
        assert_eq!(resp.user_id.map(|id| id.to_string()), Some("7".to_string()));

        let resp: CreateUserResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.user_id.is_none());
    }
}
