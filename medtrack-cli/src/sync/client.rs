//! Remote client for the CLI.
//!
//! Wraps the core user manager and turns its outcomes into plain `Result`s,
//! since a one-shot command has no local state worth keeping after a failed
//! push.

use medtrack_core::{
    AddPersonOutcome, CapacityError, Person, PushReceipt, SyncError, UserManager,
};

use crate::config::{Config, ConfigError};

/// Errors that can occur during sync client operations.
#[derive(Debug)]
pub enum SyncClientError {
    /// API base URL missing or config unreadable
    Config(ConfigError),
    /// Remote request failed
    Sync(SyncError),
    /// Local capacity limit hit
    Capacity(CapacityError),
}

impl std::fmt::Display for SyncClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncClientError::Config(e) => write!(f, "{}", e),
            SyncClientError::Sync(e) => write!(f, "{}", e),
            SyncClientError::Capacity(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SyncClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncClientError::Config(e) => Some(e),
            SyncClientError::Sync(e) => Some(e),
            SyncClientError::Capacity(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SyncClientError {
    fn from(e: ConfigError) -> Self {
        SyncClientError::Config(e)
    }
}

impl From<SyncError> for SyncClientError {
    fn from(e: SyncError) -> Self {
        SyncClientError::Sync(e)
    }
}

/// Sync client for the CLI.
pub struct SyncClient {
    manager: UserManager,
}

impl SyncClient {
    /// Creates a new sync client from config.
    ///
    /// Returns an error if no API base URL is configured.
    pub fn from_config(config: &Config) -> Result<Self, SyncClientError> {
        let url = config.require_api_base_url()?;
        tracing::debug!("Using users API at {} ({})", url, config.api_base_url.source);
        Ok(Self::new(url))
    }

    /// Creates a new sync client with an explicit base URL.
    pub fn new(api_base_url: &str) -> Self {
        Self {
            manager: UserManager::new(api_base_url),
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.manager.api_base_url()
    }

    /// Adds a person and waits for the server to accept it.
    pub async fn add_person(&self, person: Person) -> Result<PushReceipt, SyncClientError> {
        match self.manager.add_person(person).await {
            AddPersonOutcome::Rejected(e) => Err(SyncClientError::Capacity(e)),
            AddPersonOutcome::Stored(result) => Ok(result?),
        }
    }

    /// Fetches every person from the server.
    pub async fn load_people(&self) -> Result<Vec<Person>, SyncClientError> {
        self.manager.load_all_people().await?;
        Ok(self.manager.people())
    }

    /// Fetches one person by name.
    pub async fn find_person(&self, name: &str) -> Result<Option<Person>, SyncClientError> {
        self.manager.load_all_people().await?;
        Ok(self.manager.find_person(name))
    }

    /// Deletes every person on the server.
    pub async fn clear(&self) -> Result<(), SyncClientError> {
        self.manager.clear_all_data_on_server().await?;
        Ok(())
    }
}
