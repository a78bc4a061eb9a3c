//! Domain events for the Cart context.
//!
//! Payloads carry everything the ledger needs to rebuild itself on replay,
//! including a snapshot of the book taken when it was first reserved.

use bookstore_catalog::{Book, BookId};
use bookstore_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type identifier for [`ItemReserved`].
pub const ITEM_RESERVED_EVENT_TYPE: &str = "cart.item_reserved";
/// Event type identifier for [`ReservationIncreased`].
pub const RESERVATION_INCREASED_EVENT_TYPE: &str = "cart.reservation_increased";
/// Event type identifier for [`QuantityUpdated`].
pub const QUANTITY_UPDATED_EVENT_TYPE: &str = "cart.quantity_updated";
/// Event type identifier for [`ReservationRemoved`].
pub const RESERVATION_REMOVED_EVENT_TYPE: &str = "cart.reservation_removed";
/// Event type identifier for [`VisibilityToggled`].
pub const VISIBILITY_TOGGLED_EVENT_TYPE: &str = "cart.visibility_toggled";
/// Event type identifier for [`CheckedOut`].
pub const CHECKED_OUT_EVENT_TYPE: &str = "cart.checked_out";

/// The parts of a catalog book a reservation keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Catalog identifier.
    pub id: BookId,
    /// Title at reservation time.
    pub title: String,
    /// Author at reservation time.
    pub author: String,
    /// Unit price in cents at reservation time.
    pub price_cents: u64,
}

impl From<&Book> for BookSnapshot {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            price_cents: book.price_cents,
        }
    }
}

/// Emitted when a book enters the cart for the first time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReserved {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The reserved book.
    pub book: BookSnapshot,
    /// Units reserved.
    pub quantity: u32,
    /// Catalog stock observed at this moment; the reservation's ceiling.
    pub original_stock: u32,
}

/// Emitted when more units of an already-reserved book are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationIncreased {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The book whose reservation grew.
    pub book_id: BookId,
    /// Units added on top of the existing quantity.
    pub quantity: u32,
}

/// Emitted when a reservation is set to a new absolute quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityUpdated {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The book whose reservation changed.
    pub book_id: BookId,
    /// The new quantity.
    pub quantity: u32,
}

/// Emitted when a reservation is dropped from the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRemoved {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// The book that was removed.
    pub book_id: BookId,
}

/// Emitted when the cart panel is shown or hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityToggled {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// Visibility after the toggle.
    pub is_open: bool,
}

/// Emitted when the cart is checked out and emptied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckedOut {
    /// The cart identifier.
    pub cart_id: Uuid,
    /// Total charged, in cents.
    pub total_cents: u64,
    /// Units sold across all reservations.
    pub units: u64,
}

/// Event payload variants for the Cart context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartEventKind {
    /// A book has been reserved for the first time.
    ItemReserved(ItemReserved),
    /// An existing reservation has grown.
    ReservationIncreased(ReservationIncreased),
    /// A reservation's quantity has been set.
    QuantityUpdated(QuantityUpdated),
    /// A reservation has been removed.
    ReservationRemoved(ReservationRemoved),
    /// The cart panel visibility flipped.
    VisibilityToggled(VisibilityToggled),
    /// The cart has been checked out.
    CheckedOut(CheckedOut),
}

impl CartEventKind {
    /// The type identifier stored alongside the payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ItemReserved(_) => ITEM_RESERVED_EVENT_TYPE,
            Self::ReservationIncreased(_) => RESERVATION_INCREASED_EVENT_TYPE,
            Self::QuantityUpdated(_) => QUANTITY_UPDATED_EVENT_TYPE,
            Self::ReservationRemoved(_) => RESERVATION_REMOVED_EVENT_TYPE,
            Self::VisibilityToggled(_) => VISIBILITY_TOGGLED_EVENT_TYPE,
            Self::CheckedOut(_) => CHECKED_OUT_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Cart context.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: CartEventKind,
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("CartEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
