//! The read-only book catalog.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::book::{Book, BookId};
use crate::error::CatalogError;

/// Ordered, immutable list of books.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Builds a catalog from books, rejecting duplicate ids and blank titles.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` or `CatalogError::EmptyTitle`.
    pub fn new(books: Vec<Book>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id) {
                return Err(CatalogError::DuplicateId(book.id));
            }
            if book.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(book.id));
            }
        }
        Ok(Self { books })
    }

    /// Parses a YAML sequence of books.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed YAML, or any error from
    /// [`Catalog::new`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let books: Vec<Book> = serde_yaml::from_str(yaml)?;
        Self::new(books)
    }

    /// Reads and parses a YAML catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or any error
    /// from [`Catalog::from_yaml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&yaml)?;
        info!(path = %path.display(), books = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// All books, in catalog order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Looks up a book by id.
    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Books whose title or author contains `query`, ignoring case.
    ///
    /// A blank query returns the whole catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.books.iter().collect();
        }
        self.books.iter().filter(|book| book.matches(&needle)).collect()
    }

    /// Number of books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
