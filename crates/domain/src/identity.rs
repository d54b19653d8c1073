//! Caller identity value object
//!
//! Represents the identity of the caller for a single request. It is
//! constructed once per inbound request from trusted upstream headers and
//! never persisted; its lifetime is the request context.
//!
//! # Examples
//!
//! ```
//! use domain::UserIdentity;
//!
//! let identity = UserIdentity::new("alice", "alice@example.com", vec!["editor".into()]).unwrap();
//! assert!(identity.has_role("editor"));
//!
//! // An identity without an email is rejected
//! assert!(UserIdentity::new("alice", "", vec![]).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Identity of the caller making a request
///
/// Invariant: the email is always non-empty; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Subject claim of the caller (may be empty)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject: String,

    /// Email claim of the caller, guaranteed non-empty
    pub email: String,

    /// Roles granted to the caller, in the order they were declared
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl UserIdentity {
    /// Create a new identity, enforcing the non-empty email invariant
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingEmail`] if the email is empty.
    pub fn new(
        subject: impl Into<String>,
        email: impl Into<String>,
        roles: Vec<String>,
    ) -> Result<Self, DomainError> {
        let email = email.into();
        if email.is_empty() {
            return Err(DomainError::MissingEmail);
        }

        Ok(Self {
            subject: subject.into(),
            email,
            roles,
        })
    }

    /// Parse a comma-separated role list as carried by the roles header
    ///
    /// Whitespace around entries is trimmed and empty entries are dropped,
    /// so an absent header yields no roles.
    pub fn parse_roles(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Whether the caller holds the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
