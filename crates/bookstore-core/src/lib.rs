//! Shared domain abstractions for the bookstore.
//!
//! This crate defines the traits and types every bounded context of the
//! storefront depends on: aggregates, commands, events, the event
//! repository contract, the clock, and the domain error. It contains no
//! infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod repository;
