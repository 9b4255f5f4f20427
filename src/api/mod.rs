// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth::require_auth, state::AppState};

pub mod health;
pub mod messages;

pub fn router(state: AppState) -> Router {
    // The public endpoint and the probes sit outside the auth layer; the
    // private subtree rejects requests before any handler runs.
    let protected = Router::new()
        .route("/api/private", get(messages::private))
        .route("/api/private-scoped", get(messages::private_scoped))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api/public", get(messages::public))
        .merge(protected)
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        messages::public,
        messages::private,
        messages::private_scoped,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            messages::MessageResponse,
            health::HealthResponse,
            health::ReadyResponse
        )
    ),
    tags(
        (name = "Messages", description = "Public and protected message endpoints"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwksManager, TokenValidator};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let jwks = JwksManager::new("https://tenant.eu.auth0.com/.well-known/jwks.json");
        let validator = TokenValidator::new(
            jwks,
            "https://tenant.eu.auth0.com/",
            "https://api.example.com",
        );
        router(AppState::new(validator))
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = test_app();
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn public_route_needs_no_token() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/public")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(
            body["message"],
            "Hello from a public endpoint! You don't need to be authenticated to see this."
        );
    }

    #[tokio::test]
    async fn private_route_rejects_missing_header() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/private")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"message":"Unauthorized."}"#);
    }

    #[tokio::test]
    async fn scoped_route_rejects_bad_scheme() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/private-scoped")
                    .header("Authorization", "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn liveness_always_ok() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
