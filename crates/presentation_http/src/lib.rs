//! glue HTTP presentation layer
//!
//! This crate provides the HTTP API for glue: the router, the middleware
//! chain, the error envelope, and the server binary.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{AccessLogLayer, IdentityLayer, RequestId, RequestIdLayer};
pub use routes::create_router;
pub use state::AppState;

/// Program name; the API is mounted under this path prefix
pub const PROG: &str = "glue";
