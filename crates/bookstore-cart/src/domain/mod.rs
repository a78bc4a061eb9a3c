//! Domain layer: the ledger aggregate, its commands and events, and the
//! availability checks callers run before issuing intents.

pub mod aggregates;
pub mod availability;
pub mod commands;
pub mod events;
