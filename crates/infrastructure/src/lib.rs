//! Infrastructure layer - adapters for external systems
//!
//! Contains configuration loading, tracing initialization, and the
//! outbound backend HTTP client.

pub mod config;
pub mod http;
pub mod telemetry;

pub use config::{AppConfig, CliOverrides, ENV_PREFIX};
pub use http::{BackendApi, BackendClient, BackendError, RequestDescriptor, X_REQUEST_ID};
pub use telemetry::init_tracing;
