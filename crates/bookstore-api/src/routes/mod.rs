//! Route modules organized by bounded context.

pub mod books;
pub mod cart;
pub mod health;
pub mod profile;
