//! Catalog book records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable catalog identifier of a book.
pub type BookId = u64;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique, stable identifier.
    pub id: BookId,
    /// Title shown in listings.
    pub title: String,
    /// Author shown in listings.
    pub author: String,
    /// Unit price in cents.
    pub price_cents: u64,
    /// Units available when nothing is reserved.
    pub stock: u32,
}

impl Book {
    /// Case-insensitive substring match on title or author.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

/// Formats an amount in cents as dollars, e.g. `2999` as `$29.99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(pub u64);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}
