//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Newsletter status from session (JSON)
//! GET  /health        - Liveness check
//!
//! # Newsletter
//! GET  /newsletter    - Redirect to /
//! POST /newsletter    - Subscribe (form field `email`, JSON response)
//! ```

pub mod home;
pub mod newsletter;

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route(
            "/newsletter",
            get(newsletter::redirect_home).post(newsletter::subscribe),
        )
}

/// Build the full application: routes, session, request id and tracing.
///
/// Sentry layers are added by the binary so tests can use this as-is.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .layer(session_layer)
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}
