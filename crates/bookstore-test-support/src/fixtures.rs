//! Catalog fixtures.

use bookstore_catalog::{Book, BookId, Catalog};

/// A book with a generated title and author.
#[must_use]
pub fn book(id: BookId, price_cents: u64, stock: u32) -> Book {
    Book {
        id,
        title: format!("Book {id}"),
        author: format!("Author {id}"),
        price_cents,
        stock,
    }
}

/// A small catalog with searchable titles and one sold-out book.
///
/// | id | title | stock |
/// |----|-------|-------|
/// | 1 | The Pragmatic Programmer | 5 |
/// | 2 | Clean Code | 3 |
/// | 3 | Programming Rust | 2 |
/// | 4 | Refactoring | 0 |
///
/// # Panics
///
/// Never; the fixture ids are distinct.
#[must_use]
pub fn sample_catalog() -> Catalog {
    let entry = |id: BookId, title: &str, author: &str, price_cents: u64, stock: u32| Book {
        id,
        title: title.to_owned(),
        author: author.to_owned(),
        price_cents,
        stock,
    };
    Catalog::new(vec![
        entry(1, "The Pragmatic Programmer", "David Thomas", 4299, 5),
        entry(2, "Clean Code", "Robert C. Martin", 3750, 3),
        entry(3, "Programming Rust", "Jim Blandy", 5999, 2),
        entry(4, "Refactoring", "Martin Fowler", 4199, 0),
    ])
    .expect("fixture ids are distinct")
}
