//! Bookstore event store.
//!
//! Streams live in process memory for the lifetime of the session; there is
//! no durable backend.

pub mod in_memory_event_repository;
