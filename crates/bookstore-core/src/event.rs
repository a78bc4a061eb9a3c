//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// Envelope fields carried by every recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub event_id: Uuid,
    /// Dotted name used to route the payload on replay, e.g.
    /// `cart.item_reserved`.
    pub event_type: String,
    pub aggregate_id: Uuid,
    /// 1-based position within the aggregate's stream.
    pub sequence_number: i64,
    /// Correlation ID of the command that caused the event.
    pub correlation_id: Uuid,
    pub causation_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Metadata for a new event caused directly by a command: a fresh event
    /// id, `causation_id` equal to the correlation id, stamped by `clock`.
    pub fn for_command(
        event_type: &str,
        aggregate_id: Uuid,
        sequence_number: i64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            aggregate_id,
            sequence_number,
            correlation_id,
            causation_id: correlation_id,
            occurred_at: clock.now(),
        }
    }
}

/// An event an aggregate records and replays.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the dotted event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the envelope for this event.
    fn metadata(&self) -> &EventMetadata;
}
