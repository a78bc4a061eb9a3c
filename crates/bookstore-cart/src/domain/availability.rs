//! Availability query and the caller-side pre-checks.
//!
//! The ledger ignores intents it cannot honour without saying why. Callers
//! that need to tell the user run these checks first; they apply the same
//! ceilings the ledger enforces and turn a failure into a message.

use bookstore_catalog::{Book, BookId};
use bookstore_core::error::DomainError;

use super::aggregates::CartLedger;

/// Units of `book` a shopper can still add: catalog stock minus what this
/// cart already holds.
#[must_use]
pub fn displayed_stock(book: &Book, ledger: &CartLedger) -> u32 {
    book.stock.saturating_sub(ledger.reserved_quantity(book.id))
}

fn only_available(count: u32) -> DomainError {
    DomainError::validation(format!("Only {count} copies available"))
}

/// Checks that `quantity` units of `book` can be added to the cart.
///
/// # Errors
///
/// Returns `DomainError::Validation` when `quantity` is zero or exceeds the
/// displayed stock.
pub fn check_add(book: &Book, ledger: &CartLedger, quantity: u32) -> Result<(), DomainError> {
    if quantity == 0 {
        return Err(DomainError::validation("Quantity must be at least 1"));
    }
    let available = displayed_stock(book, ledger);
    if quantity > available {
        return Err(only_available(available));
    }
    Ok(())
}

/// Checks that the reservation for `book_id` can be set to `quantity`.
///
/// # Errors
///
/// Returns `DomainError::Validation` when `quantity` is zero or above the
/// reservation's ceiling, and `DomainError::NotFound` when the book is not
/// in the cart.
pub fn check_set_quantity(
    ledger: &CartLedger,
    book_id: BookId,
    quantity: u32,
) -> Result<(), DomainError> {
    if quantity == 0 {
        return Err(DomainError::validation("Quantity must be at least 1"));
    }
    let reservation = ledger
        .reservation(book_id)
        .ok_or_else(|| DomainError::not_found(format!("book {book_id} is not in the cart")))?;
    if quantity > reservation.original_stock() {
        return Err(only_available(reservation.original_stock()));
    }
    Ok(())
}

/// Checks a `+`/`-` step on the reservation for `book_id`.
///
/// A step that would drop below one unit is not an error; the ledger ignores
/// it and the cart stays as it was.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the book is not in the cart, and
/// `DomainError::Validation` when the step would exceed the ceiling.
pub fn check_adjust_quantity(
    ledger: &CartLedger,
    book_id: BookId,
    delta: i32,
) -> Result<(), DomainError> {
    let reservation = ledger
        .reservation(book_id)
        .ok_or_else(|| DomainError::not_found(format!("book {book_id} is not in the cart")))?;
    let target = i64::from(reservation.quantity()) + i64::from(delta);
    if target > i64::from(reservation.original_stock()) {
        return Err(only_available(reservation.original_stock()));
    }
    Ok(())
}

/// Checks that the cart has something to check out.
///
/// # Errors
///
/// Returns `DomainError::Validation` when the cart is empty.
pub fn check_checkout(ledger: &CartLedger) -> Result<(), DomainError> {
    if ledger.is_empty() {
        return Err(DomainError::validation("Your cart is empty"));
    }
    Ok(())
}
