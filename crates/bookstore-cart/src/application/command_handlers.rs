//! Command handlers for the Cart context.
//!
//! Each handler loads the cart's event stream, rebuilds the ledger, runs one
//! intent against it, and appends whatever the ledger recorded. A stream with
//! no events is a fresh cart: the session's ledger always exists.

use bookstore_catalog::Catalog;
use bookstore_core::aggregate::AggregateRoot;
use bookstore_core::clock::Clock;
use bookstore_core::command::Command;
use bookstore_core::error::DomainError;
use bookstore_core::repository::{EventRepository, StoredEvent};
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::query_handlers::CartView;
use crate::domain::aggregates::CartLedger;
use crate::domain::commands::{
    AddToCart, AdjustQuantity, Checkout, RemoveFromCart, ToggleCart, UpdateQuantity,
};
use crate::domain::events::{CartEvent, CartEventKind};

/// Result of a handled command.
#[derive(Debug)]
pub struct CartCommandResult {
    /// The aggregate ID affected by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted. Empty when the ledger
    /// ignored the intent.
    pub stored_events: Vec<StoredEvent>,
    /// The cart after the command.
    pub cart: CartView,
}

/// Rebuilds a `CartLedger` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    cart_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<CartLedger, DomainError> {
    let mut ledger = CartLedger::new(cart_id);
    for stored in existing_events {
        let kind: CartEventKind = serde_json::from_value(stored.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!("event deserialization failed: {e}"))
        })?;
        let event = CartEvent {
            metadata: stored.metadata(),
            kind,
        };
        ledger.apply(&event);
    }
    Ok(ledger)
}

/// Loads and rebuilds the ledger for `cart_id`.
///
/// # Errors
///
/// Returns `DomainError` if event loading or deserialization fails.
pub async fn load_ledger(
    cart_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<CartLedger, DomainError> {
    let stored_events = repo.load_events(cart_id).await?;
    reconstitute(cart_id, &stored_events)
}

async fn execute<C: Command>(
    command: &C,
    repo: &dyn EventRepository,
    intent: impl FnOnce(&mut CartLedger),
) -> Result<CartCommandResult, DomainError> {
    let cart_id = command.aggregate_id();
    let mut ledger = load_ledger(cart_id, repo).await?;

    intent(&mut ledger);

    let stored_events: Vec<StoredEvent> = ledger
        .uncommitted_events()
        .iter()
        .map(StoredEvent::from_event)
        .collect();

    if stored_events.is_empty() {
        debug!(
            command_type = command.command_type(),
            correlation_id = %command.correlation_id(),
            %cart_id,
            "intent ignored by ledger"
        );
    } else {
        repo.append_events(cart_id, ledger.version(), &stored_events)
            .await?;
        ledger.clear_uncommitted_events();
        info!(
            command_type = command.command_type(),
            correlation_id = %command.correlation_id(),
            %cart_id,
            total_cents = ledger.total_cents(),
            "intent applied"
        );
    }

    Ok(CartCommandResult {
        aggregate_id: cart_id,
        stored_events,
        cart: CartView::from(&ledger),
    })
}

/// Handles the `AddToCart` command: resolves the book in the catalog and
/// reserves the requested units.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the book is not in the catalog, or
/// `DomainError` if event loading or appending fails.
pub async fn handle_add_to_cart(
    command: &AddToCart,
    catalog: &Catalog,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<CartCommandResult, DomainError> {
    let book = catalog
        .get(command.book_id)
        .ok_or_else(|| DomainError::not_found(format!("book {}", command.book_id)))?;
    execute(command, repo, |ledger| {
        ledger.add_reservation(book, command.quantity, command.correlation_id, clock);
    })
    .await
}

/// Handles the `RemoveFromCart` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_remove_from_cart(
    command: &RemoveFromCart,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<CartCommandResult, DomainError> {
    execute(command, repo, |ledger| {
        ledger.remove_reservation(command.book_id, command.correlation_id, clock);
    })
    .await
}

/// Handles the `UpdateQuantity` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_update_quantity(
    command: &UpdateQuantity,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<CartCommandResult, DomainError> {
    execute(command, repo, |ledger| {
        ledger.set_quantity(
            command.book_id,
            command.quantity,
            command.correlation_id,
            clock,
        );
    })
    .await
}

/// Handles the `AdjustQuantity` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_adjust_quantity(
    command: &AdjustQuantity,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<CartCommandResult, DomainError> {
    execute(command, repo, |ledger| {
        ledger.adjust_quantity(command.book_id, command.delta, command.correlation_id, clock);
    })
    .await
}

/// Handles the `ToggleCart` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_toggle_cart(
    command: &ToggleCart,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<CartCommandResult, DomainError> {
    execute(command, repo, |ledger| {
        ledger.toggle_open(command.correlation_id, clock);
    })
    .await
}

/// Handles the `Checkout` command.
///
/// # Errors
///
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_checkout(
    command: &Checkout,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<CartCommandResult, DomainError> {
    execute(command, repo, |ledger| {
        ledger.checkout(command.correlation_id, clock);
    })
    .await
}
