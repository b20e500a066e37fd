use async_trait::async_trait;
use course_core::model::ProfileRecord;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key under which the single profile blob is stored.
pub const PROFILE_KEY: &str = "profile";

/// Repository contract for the single profile record.
///
/// Reads and writes are whole-record: a save replaces whatever was stored.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist the record, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_profile(&self, record: &ProfileRecord) -> Result<(), StorageError>;

    /// Fetch the most recently saved record, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or the stored value
    /// does not decode.
    async fn load_profile(&self) -> Result<Option<ProfileRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    profile: Arc<Mutex<Option<ProfileRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            profile: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn save_profile(&self, record: &ProfileRecord) -> Result<(), StorageError> {
        let mut guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }

    async fn load_profile(&self) -> Result<Option<ProfileRecord>, StorageError> {
        let guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let profiles: Arc<dyn ProfileRepository> = Arc::new(InMemoryRepository::new());
        Self { profiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::AreaOfInterest;

    #[tokio::test]
    async fn load_without_save_is_empty() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_previous_record() {
        let repo = InMemoryRepository::new();
        let first = ProfileRecord::new("A", "a@x.com", "p", Some(AreaOfInterest::Ia));
        let second = ProfileRecord::new("B", "b@x.com", "q", None);

        repo.save_profile(&first).await.unwrap();
        repo.save_profile(&second).await.unwrap();

        assert_eq!(repo.load_profile().await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn clones_share_the_same_record() {
        let repo = InMemoryRepository::new();
        let storage = Storage {
            profiles: Arc::new(repo.clone()),
        };
        let record = ProfileRecord::new("A", "a@x.com", "p", None);
        storage.profiles.save_profile(&record).await.unwrap();

        assert_eq!(repo.load_profile().await.unwrap(), Some(record));
    }
}
