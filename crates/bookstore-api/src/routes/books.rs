//! Routes for the Catalog context.
//!
//! Listings report `displayed_stock`: catalog stock minus whatever the
//! session cart already holds.

use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get};
use bookstore_cart::application::command_handlers;
use bookstore_cart::domain::aggregates::CartLedger;
use bookstore_cart::domain::availability;
use bookstore_catalog::{Book, BookId, Price};
use bookstore_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive substring of title or author.
    #[serde(default)]
    pub q: String,
}

/// One catalog entry as shown to the shopper.
#[derive(Debug, Serialize)]
pub struct BookListing {
    /// Book identifier.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// Unit price in cents.
    pub price_cents: u64,
    /// Unit price formatted for display.
    pub price: String,
    /// Catalog stock.
    pub stock: u32,
    /// Copies the shopper can still add.
    pub displayed_stock: u32,
}

impl BookListing {
    fn new(book: &Book, ledger: &CartLedger) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            price_cents: book.price_cents,
            price: Price(book.price_cents).to_string(),
            stock: book.stock,
            displayed_stock: availability::displayed_stock(book, ledger),
        }
    }
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct BooksResponse {
    /// Matching books in catalog order.
    pub books: Vec<BookListing>,
}

/// GET /
#[instrument(skip(state))]
async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<BooksResponse>, ApiError> {
    let ledger = command_handlers::load_ledger(state.cart_id, &*state.event_repository).await?;
    let books = state
        .catalog
        .search(&params.q)
        .into_iter()
        .map(|book| BookListing::new(book, &ledger))
        .collect();
    Ok(Json(BooksResponse { books }))
}

/// GET /{book_id}
#[instrument(skip(state))]
async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
) -> Result<Json<BookListing>, ApiError> {
    let book = state
        .catalog
        .get(book_id)
        .ok_or_else(|| DomainError::not_found(format!("book {book_id}")))?;
    let ledger = command_handlers::load_ledger(state.cart_id, &*state.event_repository).await?;
    Ok(Json(BookListing::new(book, &ledger)))
}

/// Returns the router for the catalog context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books))
        .route("/{book_id}", get(get_book))
}
