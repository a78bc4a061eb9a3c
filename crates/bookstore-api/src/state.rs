//! Shared application state.

use std::sync::Arc;

use bookstore_catalog::Catalog;
use bookstore_core::clock::Clock;
use bookstore_core::repository::EventRepository;
use bookstore_profile::ProfileStore;
use uuid::Uuid;

/// Application state shared across all request handlers.
///
/// The server hosts a single shopping session, so there is exactly one cart
/// stream, identified by `cart_id`.
#[derive(Clone)]
pub struct AppState {
    /// Time source for event timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Event repository holding the cart stream.
    pub event_repository: Arc<dyn EventRepository>,
    /// Read-only book catalog.
    pub catalog: Arc<Catalog>,
    /// Current shopper profile.
    pub profile_store: Arc<dyn ProfileStore>,
    /// The session's cart.
    pub cart_id: Uuid,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        event_repository: Arc<dyn EventRepository>,
        catalog: Arc<Catalog>,
        profile_store: Arc<dyn ProfileStore>,
        cart_id: Uuid,
    ) -> Self {
        Self {
            clock,
            event_repository,
            catalog,
            profile_store,
            cart_id,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog_len", &self.catalog.len())
            .field("cart_id", &self.cart_id)
            .finish_non_exhaustive()
    }
}
