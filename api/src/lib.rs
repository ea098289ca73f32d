//! The enrichment HTTP API: a thin read-only view over [`acars_enrich::EnrichmentStore`].
//!

mod auth;
mod error;
mod model;
mod routes;

use std::sync::Arc;

use acars_enrich::EnrichmentStore;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use error::ApiError;
pub use model::EnrichmentRecord;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EnrichmentStore>,
    pub api_key: Option<String>,
}

/// Build the router. `api_key` of `None` disables authentication entirely.
pub fn router(store: Arc<EnrichmentStore>, api_key: Option<String>) -> Router {
    let state = AppState { store, api_key };

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(HeaderValue::from_static("*")))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static("x-api-key"),
        ]);

    Router::new()
        .route("/api/v1/health", get(routes::health))
        .route("/api/v1/enrichment/:hex", get(routes::enrichment_by_hex))
        .route("/api/v1/enrichment/:hex/:callsign", get(routes::enrichment_by_flight))
        .route("/api/v1/enrichment/:hex/:callsign/:date", get(routes::enrichment_by_flight_on_date))
        .route("/api/v1/enrichment/batch", post(routes::enrichment_batch))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key))
        .layer(cors)
        .with_state(state)
}

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    fn unauthenticated_state() -> Router {
        // `connect_lazy` never opens a connection; fine for routes that
        // never reach the pool (health, and auth-rejected requests).
        let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/nonexistent").unwrap();
        router(Arc::new(EnrichmentStore::new(pool)), None)
    }

    fn authenticated_state(key: &str) -> Router {
        let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/nonexistent").unwrap();
        router(Arc::new(EnrichmentStore::new(pool)), Some(key.to_string()))
    }

    #[tokio::test]
    async fn health_returns_ok_without_auth() {
        let app = unauthenticated_state();
        let response = app
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_api_key_is_rejected() {
        let app = authenticated_state("secret");
        let response = app
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_api_key_is_forbidden() {
        let app = authenticated_state("secret");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-api-key", "wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn header_key_wins_over_invalid_query_key() {
        let app = authenticated_state("secret");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health?api_key=wrong")
                    .header("x-api-key", "secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_date_is_bad_request() {
        let app = unauthenticated_state();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/enrichment/7C6CA3/QF008/not-a-date")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_batch_is_bad_request() {
        let app = unauthenticated_state();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/enrichment/batch")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"aircraft": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
