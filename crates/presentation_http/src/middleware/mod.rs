//! HTTP middleware components
//!
//! Request-id assignment, access logging, and caller identity extraction.
//! Order in the chain matters: request-id first, then access log, then
//! identity, then the content-type setter applied in `routes`.

pub mod access_log;
pub mod identity;
pub mod request_id;

pub use access_log::AccessLogLayer;
pub use identity::IdentityLayer;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
