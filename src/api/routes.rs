//! API Routes
//!
//! Configures the Axum router with all screenshot service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{batch_screenshot_handler, health_handler, screenshot_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cameras/:camera_id/screenshot` - Screenshot for one camera
/// - `POST /screenshots` - Screenshots for several cameras in one scope
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cameras/:camera_id/screenshot", get(screenshot_handler))
        .route("/screenshots", post(batch_screenshot_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockScreenshotCapturer, MockStreamingUrlResolver};
    use crate::coordinator::CoordinatorSettings;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let mut resolver = MockStreamingUrlResolver::new();
        resolver
            .expect_resolve_streaming_url()
            .returning(|_, _| Ok(None));
        let state = AppState::new(
            Arc::new(resolver),
            Arc::new(MockScreenshotCapturer::new()),
            CoordinatorSettings::default(),
        );
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unavailable_screenshot_is_ok() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cameras/cam02/screenshot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_batch_rejects_empty_list() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/screenshots")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"camera_ids":[]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
