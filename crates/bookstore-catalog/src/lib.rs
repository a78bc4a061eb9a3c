//! The Catalog context.
//!
//! The catalog is a static, ordered list of books supplied once at startup.
//! Nothing in the system mutates it; carts keep their own snapshots.

pub mod book;
pub mod catalog;
pub mod error;

pub use book::{Book, BookId, Price};
pub use catalog::Catalog;
pub use error::CatalogError;
