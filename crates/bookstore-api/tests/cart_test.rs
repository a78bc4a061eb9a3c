//! Integration tests for the Cart routes.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_cart_starts_empty_and_open() {
    let state = common::test_state();

    let (status, json) = common::get_json(common::build_test_app(&state), "/api/v1/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cart_id"], state.cart_id.to_string());
    assert!(json["items"].as_array().unwrap().is_empty());
    assert_eq!(json["total"], "$0.00");
    assert_eq!(json["is_open"], true);
    assert_eq!(json["version"], 0);
}

#[tokio::test]
async fn test_shopping_session_round_trip() {
    let state = common::test_state();

    // Reserve three copies of The Pragmatic Programmer (stock 5).
    let (status, json) = common::post_json(
        common::build_test_app(&state),
        "/api/v1/cart/add",
        &json!({ "book_id": 1, "quantity": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cart"]["items"][0]["original_stock"], 5);
    assert_eq!(json["cart"]["items"][0]["stock"], 2);

    // Three more would exceed the ceiling captured on first add.
    let (status, json) = common::post_json(
        common::build_test_app(&state),
        "/api/v1/cart/add",
        &json!({ "book_id": 1, "quantity": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Only 2 copies available");

    // Step down by one.
    let (status, json) = common::post_json(
        common::build_test_app(&state),
        "/api/v1/cart/adjust-quantity",
        &json!({ "book_id": 1, "delta": -1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cart"]["items"][0]["quantity"], 2);

    // Add a second book and set it to its full stock.
    common::post_json(
        common::build_test_app(&state),
        "/api/v1/cart/add",
        &json!({ "book_id": 3, "quantity": 1 }),
    )
    .await;
    let (status, json) = common::post_json(
        common::build_test_app(&state),
        "/api/v1/cart/update-quantity",
        &json!({ "book_id": 3, "quantity": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 2 x 42.99 + 2 x 59.99
    assert_eq!(json["cart"]["total_cents"], 20596);
    assert_eq!(json["cart"]["total"], "$205.96");

    // Remove the first book.
    let (status, json) = common::post_json(
        common::build_test_app(&state),
        "/api/v1/cart/remove",
        &json!({ "book_id": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cart"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["cart"]["total_cents"], 11998);

    // Check out.
    let (status, json) = common::post_json(
        common::build_test_app(&state),
        "/api/v1/cart/checkout",
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event_ids"].as_array().unwrap().len(), 1);

    // GET /api/v1/cart reflects the persisted stream.
    let (status, json) = common::get_json(common::build_test_app(&state), "/api/v1/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["items"].as_array().unwrap().is_empty());
    assert_eq!(json["total_cents"], 0);
    assert_eq!(json["version"], 6);
}

#[tokio::test]
async fn test_removed_book_can_be_re_added_with_fresh_ceiling() {
    let state = common::test_state();
    let add = json!({ "book_id": 2, "quantity": 3 });

    common::post_json(common::build_test_app(&state), "/api/v1/cart/add", &add).await;
    common::post_json(
        common::build_test_app(&state),
        "/api/v1/cart/remove",
        &json!({ "book_id": 2 }),
    )
    .await;
    let (status, json) =
        common::post_json(common::build_test_app(&state), "/api/v1/cart/add", &add).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cart"]["items"][0]["quantity"], 3);
    assert_eq!(json["cart"]["items"][0]["original_stock"], 3);
}

#[tokio::test]
async fn test_toggle_twice_restores_visibility() {
    let state = common::test_state();

    for expected in [false, true] {
        let (status, json) = common::post_json(
            common::build_test_app(&state),
            "/api/v1/cart/toggle",
            &json!({}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["cart"]["is_open"], expected);
    }
}
