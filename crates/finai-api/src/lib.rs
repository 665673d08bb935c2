//! FinAI REST API
//!
//! HTTP surface for the FinAI personal-finance dashboard.
//!
//! # API Structure
//!
//! ```text
//! /                        - Service status (provider mode and model)
//! /health                  - Liveness with store counts
//! /api-docs/openapi.json   - OpenAPI document
//! /api/
//! ├── /transactions        - List, create, update, delete
//! ├── /transactions/trends - Monthly spending comparison
//! ├── /analyze             - AI analysis of a transaction batch
//! └── /analyses            - Saved analysis history
//! ```
//!
//! Errors are returned as `{ "error": ..., "details": ... }`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult};
pub use middleware::SlowRequestThresholds;
pub use state::AppState;

/// Origin of the dashboard dev server
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Enable CORS for browser clients
    pub enable_cors: bool,
    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
    /// Enable response compression
    pub enable_compression: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Requests slower than this are logged at `warn`
    pub slow_request_threshold: Duration,
    /// Same, for `/api/analyze`
    pub slow_analysis_threshold: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec![DEFAULT_FRONTEND_URL.to_string()],
            enable_compression: true,
            enable_tracing: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
            slow_request_threshold: Duration::from_millis(1000),
            slow_analysis_threshold: Duration::from_secs(30),
        }
    }
}

/// Create the main API router with all middleware
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let mut router = Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::service_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(axum::middleware::from_fn_with_state(
            SlowRequestThresholds {
                default: config.slow_request_threshold,
                analysis: config.slow_analysis_threshold,
            },
            middleware::timing_middleware,
        ));

    // Add tracing
    if config.enable_tracing {
        router = router.layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        );
    }

    // Request IDs are set outside the trace layer so spans can see them
    let x_request_id = HeaderName::from_static("x-request-id");
    router = router
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    // Add compression
    if config.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    if config.enable_cors {
        router = router.layer(cors_layer(&config.cors_origins));
    }

    router
}

/// CORS for the dashboard origins; `*` allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

/// Create a minimal router for testing
pub fn create_test_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::service_routes())
        .with_state(state)
}
