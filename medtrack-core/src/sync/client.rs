//! HTTP client that keeps a local list of people in step with the remote
//! users API.
//!
//! Local state changes happen synchronously before any request is sent, and
//! the people list is never locked across an `.await`. Overlapping calls on
//! the same manager therefore interleave in whatever order the server
//! answers; nothing serializes them.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::SyncError;
use super::protocol::{CreateUserResponse, PersonRecord};
use super::report::{SyncEvent, SyncReporter, TracingReporter};
use crate::models::{CapacityError, Person, MAX_PEOPLE};

/// Result of a successful `POST /users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReceipt {
    /// Identifier the server assigned, if it sent one
    pub user_id: Option<String>,
}

/// What happened to a person handed to [`UserManager::add_person`].
#[derive(Debug)]
pub enum AddPersonOutcome {
    /// The people list was full; nothing was stored or sent
    Rejected(CapacityError),
    /// Stored locally; carries the result of the remote push.
    /// The local copy is kept even when the push failed.
    Stored(Result<PushReceipt, SyncError>),
}

impl AddPersonOutcome {
    /// True if the person is now in the local list.
    pub fn is_stored(&self) -> bool {
        matches!(self, AddPersonOutcome::Stored(_))
    }

    /// True if the person is stored locally and the server accepted it.
    pub fn is_pushed(&self) -> bool {
        matches!(self, AddPersonOutcome::Stored(Ok(_)))
    }
}

/// Owns up to [`MAX_PEOPLE`] people and syncs them with `<api_base_url>/users`.
///
/// Cloning is cheap: clones share the people list, HTTP client and reporter.
#[derive(Clone)]
pub struct UserManager {
    api_base_url: String,
    http: reqwest::Client,
    people: Arc<Mutex<Vec<Person>>>,
    reporter: Arc<dyn SyncReporter>,
}

impl UserManager {
    /// Creates a manager that logs its events through `tracing`.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self::with_reporter(api_base_url, Arc::new(TracingReporter))
    }

    /// Creates a manager that sends its events to `reporter`.
    pub fn with_reporter(
        api_base_url: impl Into<String>,
        reporter: Arc<dyn SyncReporter>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            http: reqwest::Client::new(),
            people: Arc::new(Mutex::new(Vec::new())),
            reporter,
        }
    }

    /// Returns the API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Snapshot of the local people list.
    pub fn people(&self) -> Vec<Person> {
        self.lock_people().clone()
    }

    pub fn len(&self) -> usize {
        self.lock_people().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_people().is_empty()
    }

    /// First local person with this name.
    pub fn find_person(&self, name: &str) -> Option<Person> {
        self.lock_people().iter().find(|p| p.name == name).cloned()
    }

    /// Stores a person locally, then pushes it to the server.
    ///
    /// A full list rejects the person without sending anything. Otherwise the
    /// local append happens before the request and is not undone if the push
    /// fails.
    pub async fn add_person(&self, person: Person) -> AddPersonOutcome {
        let accepted = {
            let mut people = self.lock_people();
            if people.len() >= MAX_PEOPLE {
                false
            } else {
                people.push(person.clone());
                true
            }
        };

        if !accepted {
            self.reporter.report(&SyncEvent::PersonRejected {
                person: person.name.clone(),
            });
            return AddPersonOutcome::Rejected(CapacityError::People {
                person: person.name,
            });
        }

        AddPersonOutcome::Stored(self.push_one(&person).await)
    }

    /// Sends one person to `POST /users`.
    ///
    /// The outcome is reported and returned; callers that don't care may drop
    /// it. A success body without an id is accepted.
    pub async fn push_one(&self, person: &Person) -> Result<PushReceipt, SyncError> {
        let result = self.send_person(person).await;

        match &result {
            Ok(receipt) => self.reporter.report(&SyncEvent::PushSucceeded {
                person: person.name.clone(),
                user_id: receipt.user_id.clone(),
            }),
            Err(e) => self.reporter.report(&SyncEvent::PushFailed {
                person: person.name.clone(),
                error: e.to_string(),
            }),
        }

        result
    }

    /// Replaces the local list with everything from `GET /users`.
    ///
    /// Each record becomes a fresh person. Only the first [`MAX_PEOPLE`]
    /// records are kept and medications beyond the per-person limit are
    /// dropped; every dropped entry is reported. On any failure the local list
    /// is left as it was. Returns the number of people loaded.
    pub async fn load_all_people(&self) -> Result<usize, SyncError> {
        match self.fetch_people().await {
            Ok(people) => {
                let count = people.len();
                *self.lock_people() = people;
                self.reporter.report(&SyncEvent::Loaded { count });
                Ok(count)
            }
            Err(e) => {
                self.reporter.report(&SyncEvent::LoadFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Sends `DELETE /users` and empties the local list once the server
    /// confirms with a 2xx status. Transport failures and non-2xx statuses
    /// leave the local list untouched.
    pub async fn clear_all_data_on_server(&self) -> Result<(), SyncError> {
        match self.delete_people().await {
            Ok(()) => {
                self.lock_people().clear();
                self.reporter.report(&SyncEvent::Cleared);
                Ok(())
            }
            Err(e) => {
                self.reporter.report(&SyncEvent::ClearFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Emits every person's medication listing to the log.
    pub fn list_all(&self) {
        for person in self.lock_people().iter() {
            person.list_medications();
        }
    }

    /// Medication listings of every local person, in list order.
    pub fn report(&self) -> String {
        self.lock_people()
            .iter()
            .map(Person::medication_report)
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn send_person(&self, person: &Person) -> Result<PushReceipt, SyncError> {
        let response = self.http.post(self.users_url()).json(person).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { status });
        }

        let body = response.bytes().await?;
        let created = match serde_json::from_slice::<CreateUserResponse>(&body) {
            Ok(created) => created,
            Err(e) => {
                tracing::debug!("Ignoring unreadable create response: {}", e);
                CreateUserResponse::default()
            }
        };

        Ok(PushReceipt {
            user_id: created.user_id.map(|id| id.to_string()),
        })
    }

    async fn fetch_people(&self) -> Result<Vec<Person>, SyncError> {
        let response = self.http.get(self.users_url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { status });
        }

        let body = response.bytes().await?;
        let records: Vec<PersonRecord> = serde_json::from_slice(&body)?;

        let mut people = Vec::with_capacity(records.len().min(MAX_PEOPLE));
        for record in records {
            if people.len() >= MAX_PEOPLE {
                self.reporter
                    .report(&SyncEvent::PersonRejected { person: record.name });
                continue;
            }

            people.push(record.into_person(|rejected| {
                if let CapacityError::Medications { person, medication } = rejected {
                    self.reporter
                        .report(&SyncEvent::MedicationRejected { person, medication });
                }
            }));
        }

        Ok(people)
    }

    async fn delete_people(&self) -> Result<(), SyncError> {
        let response = self.http.delete(self.users_url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { status });
        }

        Ok(())
    }

    fn users_url(&self) -> String {
        self.build_http_url("/users")
    }

    /// Builds an HTTP URL for a given path.
    fn build_http_url(&self, path: &str) -> String {
        let base_url = if !self.api_base_url.starts_with("http://")
            && !self.api_base_url.starts_with("https://")
        {
            format!("http://{}", self.api_base_url)
        } else {
            self.api_base_url.clone()
        };

        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    fn lock_people(&self) -> MutexGuard<'_, Vec<Person>> {
        self.people.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for UserManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserManager")
            .field("api_base_url", &self.api_base_url)
            .field("people", &self.len())
            .finish_non_exhaustive()
    }
}
