//! Routes for the Cart context.
//!
//! Every command route runs the matching availability check against the
//! current ledger first, so the shopper hears why an intent was refused. The
//! ledger itself would ignore the same intent without comment.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use bookstore_cart::application::command_handlers::{self, CartCommandResult};
use bookstore_cart::application::query_handlers::{self, CartView};
use bookstore_cart::domain::availability;
use bookstore_cart::domain::commands;
use bookstore_catalog::BookId;
use bookstore_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /add.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    /// The catalog book to reserve.
    pub book_id: BookId,
    /// Units requested.
    pub quantity: u32,
}

/// Request body for POST /remove.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    /// The book to drop.
    pub book_id: BookId,
}

/// Request body for POST /update-quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    /// The reserved book.
    pub book_id: BookId,
    /// New absolute quantity.
    pub quantity: u32,
}

/// Request body for POST /adjust-quantity.
#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    /// The reserved book.
    pub book_id: BookId,
    /// Signed step, usually `1` or `-1`.
    pub delta: i32,
}

/// Response body returned after a command is handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// IDs of the domain events produced and persisted. Empty when the
    /// ledger ignored the intent.
    pub event_ids: Vec<Uuid>,
    /// The cart after the command.
    pub cart: CartView,
}

impl From<CartCommandResult> for CommandResponse {
    fn from(result: CartCommandResult) -> Self {
        Self {
            event_ids: result.stored_events.iter().map(|e| e.event_id).collect(),
            cart: result.cart,
        }
    }
}

/// GET /
#[instrument(skip(state))]
async fn get_cart(State(state): State<AppState>) -> Result<Json<CartView>, ApiError> {
    let view = query_handlers::get_cart(state.cart_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// POST /add
#[instrument(skip(state, request), fields(book_id = request.book_id, quantity = request.quantity))]
async fn add_to_cart(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let book = state
        .catalog
        .get(request.book_id)
        .ok_or_else(|| DomainError::not_found(format!("book {}", request.book_id)))?;
    let ledger = command_handlers::load_ledger(state.cart_id, &*state.event_repository).await?;
    availability::check_add(book, &ledger, request.quantity)?;

    let command = commands::AddToCart {
        correlation_id: Uuid::new_v4(),
        cart_id: state.cart_id,
        book_id: request.book_id,
        quantity: request.quantity,
    };

    info!(correlation_id = %command.correlation_id, "handling add_to_cart command");

    let result = command_handlers::handle_add_to_cart(
        &command,
        &state.catalog,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// POST /remove
#[instrument(skip(state, request), fields(book_id = request.book_id))]
async fn remove_from_cart(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::RemoveFromCart {
        correlation_id: Uuid::new_v4(),
        cart_id: state.cart_id,
        book_id: request.book_id,
    };

    info!(correlation_id = %command.correlation_id, "handling remove_from_cart command");

    let result = command_handlers::handle_remove_from_cart(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// POST /update-quantity
#[instrument(skip(state, request), fields(book_id = request.book_id, quantity = request.quantity))]
async fn update_quantity(
    State(state): State<AppState>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let ledger = command_handlers::load_ledger(state.cart_id, &*state.event_repository).await?;
    availability::check_set_quantity(&ledger, request.book_id, request.quantity)?;

    let command = commands::UpdateQuantity {
        correlation_id: Uuid::new_v4(),
        cart_id: state.cart_id,
        book_id: request.book_id,
        quantity: request.quantity,
    };

    info!(correlation_id = %command.correlation_id, "handling update_quantity command");

    let result = command_handlers::handle_update_quantity(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// POST /adjust-quantity
#[instrument(skip(state, request), fields(book_id = request.book_id, delta = request.delta))]
async fn adjust_quantity(
    State(state): State<AppState>,
    Json(request): Json<AdjustQuantityRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let ledger = command_handlers::load_ledger(state.cart_id, &*state.event_repository).await?;
    availability::check_adjust_quantity(&ledger, request.book_id, request.delta)?;

    let command = commands::AdjustQuantity {
        correlation_id: Uuid::new_v4(),
        cart_id: state.cart_id,
        book_id: request.book_id,
        delta: request.delta,
    };

    info!(correlation_id = %command.correlation_id, "handling adjust_quantity command");

    let result = command_handlers::handle_adjust_quantity(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// POST /toggle
#[instrument(skip(state))]
async fn toggle_cart(State(state): State<AppState>) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ToggleCart {
        correlation_id: Uuid::new_v4(),
        cart_id: state.cart_id,
    };

    info!(correlation_id = %command.correlation_id, "handling toggle_cart command");

    let result = command_handlers::handle_toggle_cart(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.into()))
}

/// POST /checkout
#[instrument(skip(state))]
async fn checkout(State(state): State<AppState>) -> Result<Json<CommandResponse>, ApiError> {
    let ledger = command_handlers::load_ledger(state.cart_id, &*state.event_repository).await?;
    availability::check_checkout(&ledger)?;

    let command = commands::Checkout {
        correlation_id: Uuid::new_v4(),
        cart_id: state.cart_id,
    };

    info!(correlation_id = %command.correlation_id, "handling checkout command");

    let result =
        command_handlers::handle_checkout(&command, state.clock.as_ref(), &*state.event_repository)
            .await?;

    Ok(Json(result.into()))
}

/// Returns the router for the cart context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart))
        .route("/add", post(add_to_cart))
        .route("/remove", post(remove_from_cart))
        .route("/update-quantity", post(update_quantity))
        .route("/adjust-quantity", post(adjust_quantity))
        .route("/toggle", post(toggle_cart))
        .route("/checkout", post(checkout))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bookstore_core::clock::Clock;
    use bookstore_core::repository::EventRepository;
    use bookstore_event_store::in_memory_event_repository::InMemoryEventRepository;
    use bookstore_profile::InMemoryProfileStore;
    use bookstore_test_support::{FailingEventRepository, FixedClock, sample_catalog};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_state_with(event_repository: Arc<dyn EventRepository>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::standard());
        AppState::new(
            clock,
            event_repository,
            Arc::new(sample_catalog()),
            Arc::new(InMemoryProfileStore::new()),
            Uuid::new_v4(),
        )
    }

    fn test_app_state() -> AppState {
        app_state_with(Arc::new(InMemoryEventRepository::new()))
    }

    async fn post(state: &AppState, uri: &str, body: &Value) -> (StatusCode, Value) {
        let app = router().with_state(state.clone());
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_200_with_event_ids_and_cart() {
        // Arrange
        let state = test_app_state();

        // Act
        let (status, json) =
            post(&state, "/add", &json!({ "book_id": 1, "quantity": 2 })).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let event_ids = json["event_ids"].as_array().unwrap();
        assert_eq!(event_ids.len(), 1);
        for id in event_ids {
            Uuid::parse_str(id.as_str().unwrap()).unwrap();
        }
        assert_eq!(json["cart"]["total_cents"], 8598);
        assert_eq!(json["cart"]["total"], "$85.98");
        assert_eq!(json["cart"]["items"][0]["stock"], 3);
    }

    #[tokio::test]
    async fn test_add_to_cart_beyond_stock_returns_400_with_message() {
        // Arrange
        let state = test_app_state();
        post(&state, "/add", &json!({ "book_id": 2, "quantity": 2 })).await;

        // Act
        let (status, json) =
            post(&state, "/add", &json!({ "book_id": 2, "quantity": 2 })).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["message"], "Only 1 copies available");
    }

    #[tokio::test]
    async fn test_add_sold_out_book_returns_400() {
        let state = test_app_state();

        let (status, json) =
            post(&state, "/add", &json!({ "book_id": 4, "quantity": 1 })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Only 0 copies available");
    }

    #[tokio::test]
    async fn test_add_unknown_book_returns_404() {
        let state = test_app_state();

        let (status, json) =
            post(&state, "/add", &json!({ "book_id": 42, "quantity": 1 })).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_422_for_missing_fields() {
        // Arrange
        let app = router().with_state(test_app_state());
        let request = Request::builder()
            .method("POST")
            .uri("/add")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert: axum rejects bodies that fail to deserialize.
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_remove_absent_book_is_ignored() {
        let state = test_app_state();

        let (status, json) = post(&state, "/remove", &json!({ "book_id": 3 })).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["event_ids"].as_array().unwrap().is_empty());
        assert_eq!(json["cart"]["version"], 0);
    }

    #[tokio::test]
    async fn test_update_quantity_above_original_stock_returns_400() {
        // Arrange
        let state = test_app_state();
        post(&state, "/add", &json!({ "book_id": 3, "quantity": 1 })).await;

        // Act
        let (status, json) = post(
            &state,
            "/update-quantity",
            &json!({ "book_id": 3, "quantity": 3 }),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Only 2 copies available");
    }

    #[tokio::test]
    async fn test_update_quantity_for_book_not_in_cart_returns_404() {
        let state = test_app_state();

        let (status, _) = post(
            &state,
            "/update-quantity",
            &json!({ "book_id": 1, "quantity": 1 }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_adjust_quantity_below_one_leaves_cart_unchanged() {
        // Arrange
        let state = test_app_state();
        post(&state, "/add", &json!({ "book_id": 1, "quantity": 1 })).await;

        // Act
        let (status, json) = post(
            &state,
            "/adjust-quantity",
            &json!({ "book_id": 1, "delta": -1 }),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert!(json["event_ids"].as_array().unwrap().is_empty());
        assert_eq!(json["cart"]["items"][0]["quantity"], 1);
    }

    #[tokio::test]
    async fn test_toggle_flips_visibility() {
        let state = test_app_state();

        let (status, json) = post(&state, "/toggle", &json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["cart"]["is_open"], false);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_400() {
        let state = test_app_state();

        let (status, json) = post(&state, "/checkout", &json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Your cart is empty");
    }

    #[tokio::test]
    async fn test_checkout_clears_cart() {
        // Arrange
        let state = test_app_state();
        post(&state, "/add", &json!({ "book_id": 2, "quantity": 3 })).await;

        // Act
        let (status, json) = post(&state, "/checkout", &json!({})).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["event_ids"].as_array().unwrap().len(), 1);
        assert!(json["cart"]["items"].as_array().unwrap().is_empty());
        assert_eq!(json["cart"]["total_cents"], 0);
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_500_when_repository_fails() {
        // Arrange
        let state = app_state_with(Arc::new(FailingEventRepository));

        // Act
        let (status, json) =
            post(&state, "/add", &json!({ "book_id": 1, "quantity": 1 })).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }
}
