//! Domain layer for glue
//!
//! Contains the core request-scoped types and domain errors. This layer
//! has no I/O dependencies and defines the ubiquitous language.

pub mod errors;
pub mod identity;

pub use errors::DomainError;
pub use identity::UserIdentity;
