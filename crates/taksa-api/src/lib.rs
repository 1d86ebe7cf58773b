// Taksa API
// Decision: Account, driver, house and order routes share one prefix; /health and docs do not
// Decision: Every resource module gets its own state holding an AuthState for the extractor

pub mod api;
pub mod auth;
pub mod config;
pub mod openapi;
pub mod services;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use taksa_storage::StorageBackend;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api::{drivers::DriversState, houses::HousesState, orders::OrdersState};
use auth::AuthState;
use openapi::ApiDoc;
use services::OrderService;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// All API routes without prefix, docs or layers
pub fn api_routes(auth_state: AuthState) -> Router {
    let storage: StorageBackend = auth_state.storage.clone();

    let drivers_state = DriversState {
        storage: storage.clone(),
        auth: auth_state.clone(),
    };
    let houses_state = HousesState {
        storage: storage.clone(),
        auth: auth_state.clone(),
    };
    let orders_state = OrdersState {
        service: OrderService::new(storage),
        auth: auth_state.clone(),
    };

    Router::new()
        .merge(auth::routes(auth_state))
        .merge(api::drivers::routes(drivers_state))
        .merge(api::houses::routes(houses_state))
        .merge(api::orders::routes(orders_state))
}

/// Complete application router
pub fn build_app(auth_state: AuthState, api_prefix: &str, cors_origins: Vec<HeaderValue>) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .merge(build_router_with_prefix(api_routes(auth_state), api_prefix))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // CORS only when origins are configured
    let app = if !cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                ])
                .allow_credentials(true),
        )
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}

/// Build router with optional API prefix
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_routes() -> Router {
        Router::new().route("/driver", get(|| async { "ok" }))
    }

    #[tokio::test]
    async fn test_api_prefix_empty() {
        let app = build_router_with_prefix(test_routes(), "");

        let response = app
            .oneshot(Request::builder().uri("/driver").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_api_prefix_set() {
        let app = build_router_with_prefix(test_routes(), "/api/taksa");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/taksa/driver")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        // Route should NOT work without prefix
        let response = app
            .oneshot(Request::builder().uri("/driver").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }
}
