//! Aggregate roots for the Cart context.
//!
//! `CartLedger` owns the session's reservations and running total. Every
//! intent is validated against the reservation's stock ceiling first; a
//! rejected intent is a silent no-op that records no event and leaves the
//! ledger untouched. An accepted intent records exactly one event, which is
//! applied to the ledger immediately.

use bookstore_catalog::{Book, BookId};
use bookstore_core::aggregate::AggregateRoot;
use bookstore_core::clock::Clock;
use bookstore_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    BookSnapshot, CartEvent, CartEventKind, CheckedOut, ItemReserved, QuantityUpdated,
    ReservationIncreased, ReservationRemoved, VisibilityToggled,
};

/// A cart line: units of one book held against its stock ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    book: BookSnapshot,
    quantity: u32,
    original_stock: u32,
}

impl Reservation {
    /// The reserved book as it was when first added.
    #[must_use]
    pub fn book(&self) -> &BookSnapshot {
        &self.book
    }

    /// Catalog identifier of the reserved book.
    #[must_use]
    pub fn book_id(&self) -> BookId {
        self.book.id
    }

    /// Units held.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Catalog stock captured when the book first entered the cart.
    #[must_use]
    pub fn original_stock(&self) -> u32 {
        self.original_stock
    }

    /// Units still sellable from the ledger's point of view.
    #[must_use]
    pub fn stock(&self) -> u32 {
        self.original_stock.saturating_sub(self.quantity)
    }

    /// `price × quantity`, in cents.
    #[must_use]
    pub fn line_total_cents(&self) -> u64 {
        self.book.price_cents.saturating_mul(u64::from(self.quantity))
    }
}

/// The aggregate root for a session's shopping cart.
#[derive(Debug, Clone)]
pub struct CartLedger {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Persisted event count.
    pub(crate) version: i64,
    /// Reservations in insertion order, at most one per book.
    reservations: Vec<Reservation>,
    /// Running total in cents, maintained incrementally.
    total_cents: u64,
    /// Whether the cart panel is shown.
    is_open: bool,
    /// Recorded events pending persistence.
    uncommitted_events: Vec<CartEvent>,
}

impl CartLedger {
    /// Creates an empty, open ledger.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            reservations: Vec::new(),
            total_cents: 0,
            is_open: true,
            uncommitted_events: Vec::new(),
        }
    }

    /// Reservations in the order books were first added.
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// The reservation for `book_id`, if any.
    #[must_use]
    pub fn reservation(&self, book_id: BookId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.book_id() == book_id)
    }

    /// Units of `book_id` currently held.
    #[must_use]
    pub fn reserved_quantity(&self, book_id: BookId) -> u32 {
        self.reservation(book_id).map_or(0, Reservation::quantity)
    }

    /// Running total in cents.
    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.total_cents
    }

    /// Sum of line totals computed from scratch. Always equal to
    /// [`CartLedger::total_cents`].
    #[must_use]
    pub fn recomputed_total_cents(&self) -> u64 {
        self.reservations
            .iter()
            .map(Reservation::line_total_cents)
            .fold(0, u64::saturating_add)
    }

    /// Whether the cart panel is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether the cart holds no reservations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Total units held across all reservations.
    #[must_use]
    pub fn units(&self) -> u64 {
        self.reservations.iter().map(|r| u64::from(r.quantity)).sum()
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    /// The total after the line worth `replaced_cents` becomes `quantity`
    /// units at `price_cents`, or `None` if it does not fit in a `u64`.
    fn total_with_line(&self, replaced_cents: u64, price_cents: u64, quantity: u32) -> Option<u64> {
        price_cents
            .checked_mul(u64::from(quantity))?
            .checked_add(self.total_cents.saturating_sub(replaced_cents))
    }

    /// Reserves `quantity` units of `book`, opening the cart panel.
    ///
    /// For a book not yet in the cart, `book.stock` becomes the reservation's
    /// ceiling and the request must fit within it. For a book already in the
    /// cart, the combined quantity must fit within the ceiling captured on
    /// first add. Zero or over-ceiling requests are ignored, as are requests
    /// whose total would not fit in a `u64` of cents.
    pub fn add_reservation(
        &mut self,
        book: &Book,
        quantity: u32,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        if quantity == 0 {
            return;
        }

        let kind = match self.reservation(book.id) {
            None => {
                if quantity > book.stock
                    || self.total_with_line(0, book.price_cents, quantity).is_none()
                {
                    return;
                }
                CartEventKind::ItemReserved(ItemReserved {
                    cart_id: self.id,
                    book: BookSnapshot::from(book),
                    quantity,
                    original_stock: book.stock,
                })
            }
            Some(existing) => {
                let fits = existing
                    .quantity
                    .checked_add(quantity)
                    .filter(|&combined| combined <= existing.original_stock)
                    .and_then(|combined| {
                        self.total_with_line(
                            existing.line_total_cents(),
                            existing.book.price_cents,
                            combined,
                        )
                    })
                    .is_some();
                if !fits {
                    return;
                }
                CartEventKind::ReservationIncreased(ReservationIncreased {
                    cart_id: self.id,
                    book_id: book.id,
                    quantity,
                })
            }
        };

        self.record(kind, correlation_id, clock);
    }

    /// Drops the reservation for `book_id`. Unknown ids are ignored.
    pub fn remove_reservation(&mut self, book_id: BookId, correlation_id: Uuid, clock: &dyn Clock) {
        if self.reservation(book_id).is_none() {
            return;
        }
        self.record(
            CartEventKind::ReservationRemoved(ReservationRemoved {
                cart_id: self.id,
                book_id,
            }),
            correlation_id,
            clock,
        );
    }

    /// Sets the reservation for `book_id` to an absolute `quantity`.
    ///
    /// Ignored when the book is not in the cart, when `quantity` is zero, when
    /// it exceeds the reservation's ceiling, when it equals the current
    /// quantity, or when the new total would overflow.
    pub fn set_quantity(
        &mut self,
        book_id: BookId,
        quantity: u32,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let Some(existing) = self.reservation(book_id) else {
            return;
        };
        if quantity == 0 || quantity > existing.original_stock || quantity == existing.quantity {
            return;
        }
        let price_cents = existing.book.price_cents;
        if self
            .total_with_line(existing.line_total_cents(), price_cents, quantity)
            .is_none()
        {
            return;
        }
        self.record(
            CartEventKind::QuantityUpdated(QuantityUpdated {
                cart_id: self.id,
                book_id,
                quantity,
            }),
            correlation_id,
            clock,
        );
    }

    /// Moves the reservation for `book_id` by `delta` units, as the cart's
    /// +/- controls do. Results below one are ignored.
    pub fn adjust_quantity(
        &mut self,
        book_id: BookId,
        delta: i32,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let Some(existing) = self.reservation(book_id) else {
            return;
        };
        let target = i64::from(existing.quantity) + i64::from(delta);
        if let Ok(quantity) = u32::try_from(target) {
            self.set_quantity(book_id, quantity, correlation_id, clock);
        }
    }

    /// Sells everything in the cart and resets it to empty. Always succeeds,
    /// including on an empty cart.
    pub fn checkout(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.record(
            CartEventKind::CheckedOut(CheckedOut {
                cart_id: self.id,
                total_cents: self.total_cents,
                units: self.units(),
            }),
            correlation_id,
            clock,
        );
    }

    /// Shows or hides the cart panel.
    pub fn toggle_open(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.record(
            CartEventKind::VisibilityToggled(VisibilityToggled {
                cart_id: self.id,
                is_open: !self.is_open,
            }),
            correlation_id,
            clock,
        );
    }

    fn record(&mut self, kind: CartEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = CartEvent {
            metadata: EventMetadata::for_command(
                kind.event_type(),
                self.id,
                self.next_sequence_number(),
                correlation_id,
                clock,
            ),
            kind,
        };
        self.mutate(&event.kind);
        self.uncommitted_events.push(event);
    }

    fn mutate(&mut self, kind: &CartEventKind) {
        match kind {
            CartEventKind::ItemReserved(payload) => {
                let reservation = Reservation {
                    book: payload.book.clone(),
                    quantity: payload.quantity,
                    original_stock: payload.original_stock,
                };
                self.total_cents = self.total_cents.saturating_add(reservation.line_total_cents());
                self.reservations.push(reservation);
                self.is_open = true;
            }
            CartEventKind::ReservationIncreased(payload) => {
                if let Some(reservation) = self.reservation_mut(payload.book_id) {
                    reservation.quantity = reservation.quantity.saturating_add(payload.quantity);
                    let added = reservation
                        .book
                        .price_cents
                        .saturating_mul(u64::from(payload.quantity));
                    self.total_cents = self.total_cents.saturating_add(added);
                }
                self.is_open = true;
            }
            CartEventKind::QuantityUpdated(payload) => {
                if let Some(reservation) = self.reservation_mut(payload.book_id) {
                    let previous = reservation.line_total_cents();
                    reservation.quantity = payload.quantity;
                    let current = reservation.line_total_cents();
                    self.total_cents = self
                        .total_cents
                        .saturating_sub(previous)
                        .saturating_add(current);
                }
            }
            CartEventKind::ReservationRemoved(payload) => {
                if let Some(index) = self
                    .reservations
                    .iter()
                    .position(|r| r.book_id() == payload.book_id)
                {
                    let removed = self.reservations.remove(index);
                    self.total_cents = self.total_cents.saturating_sub(removed.line_total_cents());
                }
            }
            CartEventKind::VisibilityToggled(payload) => {
                self.is_open = payload.is_open;
            }
            CartEventKind::CheckedOut(_) => {
                self.reservations.clear();
                self.total_cents = 0;
            }
        }
    }

    fn reservation_mut(&mut self, book_id: BookId) -> Option<&mut Reservation> {
        self.reservations.iter_mut().find(|r| r.book_id() == book_id)
    }
}

impl AggregateRoot for CartLedger {
    type Event = CartEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        self.mutate(&event.kind);
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    #[allow(clippy::cast_possible_wrap)]
    fn clear_uncommitted_events(&mut self) {
        self.version += self.uncommitted_events.len() as i64;
        self.uncommitted_events.clear();
    }
}
