//! The Cart context.
//!
//! Owns the session's cart ledger: the reservations held against catalog
//! stock, the running total, and the rules that stop a cart from holding
//! more copies than were available when a book was first added.

pub mod application;
pub mod domain;
