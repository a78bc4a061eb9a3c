//! `EventRepository` doubles for handler and route tests.

use std::sync::Mutex;

use async_trait::async_trait;
use bookstore_core::error::DomainError;
use bookstore_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

/// One `append_events` call as seen by [`RecordingEventRepository`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppendedBatch {
    pub aggregate_id: Uuid,
    pub expected_version: i64,
    pub events: Vec<StoredEvent>,
}

/// Serves a fixed stream from every load and remembers each append without
/// adding it to that stream, so a test sees exactly what one handler call
/// wrote.
#[derive(Debug, Default)]
pub struct RecordingEventRepository {
    stream: Vec<StoredEvent>,
    appended: Mutex<Vec<AppendedBatch>>,
}

impl RecordingEventRepository {
    /// A repository whose every load returns `stream`.
    #[must_use]
    pub fn new(stream: Vec<StoredEvent>) -> Self {
        Self {
            stream,
            appended: Mutex::default(),
        }
    }

    /// Batches appended so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if a previous append panicked while holding the lock.
    pub fn appended_events(&self) -> Vec<AppendedBatch> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for RecordingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self.stream.clone())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.appended.lock().unwrap().push(AppendedBatch {
            aggregate_id,
            expected_version,
            events: events.to_vec(),
        });
        Ok(())
    }
}

/// Loads nothing and accepts every append: a cart nobody has touched.
#[derive(Debug)]
pub struct EmptyEventRepository;

#[async_trait]
impl EventRepository for EmptyEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(Vec::new())
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Fails every call with `DomainError::Infrastructure`, like a store that
/// has gone away.
#[derive(Debug)]
pub struct FailingEventRepository;

fn store_unavailable() -> DomainError {
    DomainError::Infrastructure("event store unavailable".to_owned())
}

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(store_unavailable())
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(store_unavailable())
    }
}
