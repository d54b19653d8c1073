//! Route definitions
//!
//! Builds the router: one static route under the program prefix, JSON
//! fallbacks for unmatched paths and methods, and the middleware chain in
//! order request-id, access log, identity, content-type.

use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{MethodRouter, get},
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    PROG,
    error::ApiError,
    handlers,
    middleware::{AccessLogLayer, IdentityLayer, RequestIdLayer},
    state::AppState,
};

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// The single status route with its method fallback
fn status_route() -> MethodRouter<AppState> {
    get(handlers::status::index).fallback(method_not_allowed)
}

/// Create the main router with all middleware attached
///
/// The status route is registered for both `/{prog}` and `/{prog}/`;
/// axum treats the two as distinct paths, and both must serve the route
/// and its method-not-allowed fallback.
///
/// Identity extraction wraps the whole router, so unmatched paths are
/// also rejected with 401 when the email header is missing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(&format!("/{PROG}"), status_route())
        .route(&format!("/{PROG}/"), status_route())
        .fallback(not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(IdentityLayer::new())
        .layer(AccessLogLayer::new())
        .layer(RequestIdLayer::new())
}
