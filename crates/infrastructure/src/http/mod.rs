//! Outbound HTTP plumbing

mod backend;

pub use backend::{BackendApi, BackendClient, BackendError, RequestDescriptor, X_REQUEST_ID};
