//! Application route configuration.

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{admin_routes, auth_routes, rating_routes, session_routes, store_routes};
use super::middleware::{admin_guard, auth_middleware, rate_limit_auth_middleware};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let auth_state = state.clone();
    let authenticated = move || middleware::from_fn_with_state(auth_state.clone(), auth_middleware);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Every /auth route is rate limited; session routes also need a token
        .nest(
            "/auth",
            auth_routes()
                .merge(session_routes().route_layer(authenticated()))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_auth_middleware,
                )),
        )
        // Layers run bottom-up: authenticate first, then check the role
        .nest(
            "/admin",
            admin_routes()
                .route_layer(middleware::from_fn(admin_guard))
                .route_layer(authenticated()),
        )
        .nest("/stores", store_routes().route_layer(authenticated()))
        .nest("/ratings", rating_routes().route_layer(authenticated()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy; `*` allows any origin
pub fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origin == "*" {
        return layer.allow_origin(Any);
    }

    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin).allow_credentials(true),
        Err(_) => {
            tracing::warn!(origin = %allowed_origin, "Invalid CORS origin, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}

async fn root() -> &'static str {
    "Welcome to the Store Rating API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (database, healthy) = match state.health.ping().await {
        Ok(()) => (
            ServiceStatus {
                status: "healthy",
                error: None,
            },
            true,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                ServiceStatus {
                    status: "unhealthy",
                    error: Some("Database unreachable"),
                },
                false,
            )
        }
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
