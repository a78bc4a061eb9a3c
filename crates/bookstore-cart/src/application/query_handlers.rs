//! Query handlers for the Cart context.
//!
//! This module contains query handlers that reconstitute the ledger from
//! stored events and return read-only view DTOs.

use bookstore_catalog::{BookId, Price};
use bookstore_core::aggregate::AggregateRoot;
use bookstore_core::error::DomainError;
use bookstore_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::{CartLedger, Reservation};

/// Read-only view of one reservation.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    /// The reserved book.
    pub book_id: BookId,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Unit price in cents.
    pub price_cents: u64,
    /// Units reserved.
    pub quantity: u32,
    /// Stock ceiling captured on first add.
    pub original_stock: u32,
    /// Units still sellable (`original_stock - quantity`).
    pub stock: u32,
    /// `price_cents * quantity`.
    pub line_total_cents: u64,
    /// Line total formatted for display.
    pub line_total: String,
}

impl From<&Reservation> for CartItemView {
    fn from(reservation: &Reservation) -> Self {
        let book = reservation.book();
        Self {
            book_id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            price_cents: book.price_cents,
            quantity: reservation.quantity(),
            original_stock: reservation.original_stock(),
            stock: reservation.stock(),
            line_total_cents: reservation.line_total_cents(),
            line_total: Price(reservation.line_total_cents()).to_string(),
        }
    }
}

/// Read-only view of the cart ledger.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// Reservations in insertion order.
    pub items: Vec<CartItemView>,
    /// Running total in cents.
    pub total_cents: u64,
    /// Total formatted for display.
    pub total: String,
    /// Whether the cart panel is shown.
    pub is_open: bool,
    /// Current version (event count).
    pub version: i64,
}

impl From<&CartLedger> for CartView {
    fn from(ledger: &CartLedger) -> Self {
        Self {
            cart_id: ledger.id,
            items: ledger.reservations().iter().map(CartItemView::from).collect(),
            total_cents: ledger.total_cents(),
            total: Price(ledger.total_cents()).to_string(),
            is_open: ledger.is_open(),
            version: ledger.version(),
        }
    }
}

/// Retrieves the cart for `cart_id`.
///
/// A cart with no events yet is returned as an empty, open cart.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event loading or deserialization
/// fails.
pub async fn get_cart(cart_id: Uuid, repo: &dyn EventRepository) -> Result<CartView, DomainError> {
    let ledger = command_handlers::load_ledger(cart_id, repo).await?;
    Ok(CartView::from(&ledger))
}
