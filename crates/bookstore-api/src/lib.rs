//! Bookstore HTTP API.
//!
//! Exposes the catalog, the session cart and the shopper profile over JSON.
//! The binary in `main.rs` wires configuration and tracing around
//! [`build_router`].

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

/// Builds the application router with every context mounted.
pub fn build_router(app_state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/books", routes::books::router())
        .nest("/api/v1/cart", routes::cart::router())
        .nest("/api/v1/profile", routes::profile::router())
        .with_state(app_state)
}
