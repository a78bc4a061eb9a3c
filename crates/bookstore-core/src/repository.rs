//! Event storage contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::event::{DomainEvent, EventMetadata};

/// An event as the store keeps it: the envelope flattened next to a JSON
/// payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    pub event_id: Uuid,
    pub aggregate_id: Uuid,
    /// Routes `payload` back to its event kind on replay.
    pub event_type: String,
    pub payload: serde_json::Value,
    /// 1-based; equals the stream length after this event is appended.
    pub sequence_number: i64,
    pub correlation_id: Uuid,
    pub causation_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl StoredEvent {
    /// Flattens a recorded domain event for the store.
    #[must_use]
    pub fn from_event<E: DomainEvent>(event: &E) -> Self {
        let meta = event.metadata();
        Self {
            event_id: meta.event_id,
            aggregate_id: meta.aggregate_id,
            event_type: event.event_type().to_owned(),
            payload: event.to_payload(),
            sequence_number: meta.sequence_number,
            correlation_id: meta.correlation_id,
            causation_id: meta.causation_id,
            occurred_at: meta.occurred_at,
        }
    }

    /// The envelope of this event, for rebuilding the domain event on replay.
    #[must_use]
    pub fn metadata(&self) -> EventMetadata {
        EventMetadata {
            event_id: self.event_id,
            event_type: self.event_type.clone(),
            aggregate_id: self.aggregate_id,
            sequence_number: self.sequence_number,
            correlation_id: self.correlation_id,
            causation_id: self.causation_id,
            occurred_at: self.occurred_at,
        }
    }
}

/// Append-only storage of per-aggregate event streams.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// The stream for `aggregate_id` in sequence order. An aggregate nobody
    /// has written to yields an empty stream, not an error.
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError>;

    /// Appends `events` if the stream still holds exactly `expected_version`
    /// events; otherwise fails with `DomainError::ConcurrencyConflict` and
    /// writes nothing.
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError>;
}
