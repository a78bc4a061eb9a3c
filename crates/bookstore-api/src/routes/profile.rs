//! Routes for the Profile context.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use bookstore_profile::Profile;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// The stored profile plus display initials.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The current profile.
    #[serde(flatten)]
    pub profile: Profile,
    /// Upper-cased initials, empty until both names are set.
    pub initials: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let initials = profile.initials();
        Self { profile, initials }
    }
}

/// GET /
#[instrument(skip(state))]
async fn get_profile(State(state): State<AppState>) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profile_store.get().await?;
    Ok(Json(profile.into()))
}

/// PUT /
#[instrument(skip(state, profile))]
async fn update_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<ProfileResponse>, ApiError> {
    profile.validate()?;
    state.profile_store.set(profile.clone()).await?;
    info!("profile updated");
    Ok(Json(profile.into()))
}

/// Returns the router for the profile context.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bookstore_core::clock::Clock;
    use bookstore_profile::InMemoryProfileStore;
    use bookstore_test_support::{EmptyEventRepository, FixedClock, sample_catalog};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_app_state() -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::standard());
        AppState::new(
            clock,
            Arc::new(EmptyEventRepository),
            Arc::new(sample_catalog()),
            Arc::new(InMemoryProfileStore::new()),
            Uuid::new_v4(),
        )
    }

    async fn send(state: &AppState, method: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let app = router().with_state(state.clone());
        let builder = Request::builder().method(method).uri("/");
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_get_profile_starts_blank() {
        let state = test_app_state();

        let (status, json) = send(&state, "GET", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["first_name"], "");
        assert_eq!(json["initials"], "");
        assert!(json["date_of_birth"].is_null());
    }

    #[tokio::test]
    async fn test_put_profile_stores_and_returns_initials() {
        // Arrange
        let state = test_app_state();
        let body = json!({
            "first_name": "ada",
            "last_name": "lovelace",
            "email": "ada@example.org",
            "date_of_birth": "1815-12-10",
        });

        // Act
        let (status, json) = send(&state, "PUT", Some(&body)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["initials"], "AL");
        let (_, stored) = send(&state, "GET", None).await;
        assert_eq!(stored["email"], "ada@example.org");
        assert_eq!(stored["date_of_birth"], "1815-12-10");
    }

    #[tokio::test]
    async fn test_put_profile_with_bad_email_returns_400_and_keeps_previous() {
        // Arrange
        let state = test_app_state();
        let body = json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada-at-example",
        });

        // Act
        let (status, json) = send(&state, "PUT", Some(&body)).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid email format");
        let (_, stored) = send(&state, "GET", None).await;
        assert_eq!(stored["first_name"], "");
    }
}
