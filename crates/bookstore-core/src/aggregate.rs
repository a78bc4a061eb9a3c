//! Event-sourced aggregate contract.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An aggregate whose state is the fold of its event stream.
///
/// Intents record events and apply them at once, so state is current before
/// anything is persisted. `version` counts only events already in the
/// store, which makes it the expected version for the next append.
pub trait AggregateRoot: Send + Sync {
    type Event: DomainEvent;

    fn aggregate_id(&self) -> Uuid;

    /// Persisted events folded into this aggregate.
    fn version(&self) -> i64;

    /// Folds a persisted event in during replay and bumps `version`.
    fn apply(&mut self, event: &Self::Event);

    /// Events recorded since the last successful append.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Call after the uncommitted events were appended: moves `version` past
    /// them and empties the buffer.
    fn clear_uncommitted_events(&mut self);
}
