//! Catalog loading errors.

use thiserror::Error;

use crate::book::BookId;

/// Errors raised while loading the catalog at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not a valid list of books.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two entries share an identifier.
    #[error("duplicate book id {0}")]
    DuplicateId(BookId),

    /// An entry has a blank title.
    #[error("book {0} has an empty title")]
    EmptyTitle(BookId),
}
