//! Shared test doubles and fixtures for the bookstore backend.

mod clock;
mod fixtures;
mod repository;

pub use clock::FixedClock;
pub use fixtures::{book, sample_catalog};
pub use repository::{
    AppendedBatch, EmptyEventRepository, FailingEventRepository, RecordingEventRepository,
};
