//! Bookstore API server entry point.

use std::sync::Arc;

use bookstore_api::config::Config;
use bookstore_api::error::AppError;
use bookstore_api::state::AppState;
use bookstore_catalog::Catalog;
use bookstore_core::clock::SystemClock;
use bookstore_event_store::in_memory_event_repository::InMemoryEventRepository;
use bookstore_profile::InMemoryProfileStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting bookstore API server");

    let config = Config::from_env()?;
    let catalog = Catalog::load(&config.catalog_path)?;

    let cart_id = Uuid::now_v7();
    tracing::info!(%cart_id, "session cart opened");

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(InMemoryEventRepository::new()),
        Arc::new(catalog),
        Arc::new(InMemoryProfileStore::new()),
        cart_id,
    );

    let app = bookstore_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
