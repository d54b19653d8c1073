//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Caller identity is missing its email claim
    #[error("Identity email is missing")]
    MissingEmail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_email_display() {
        assert_eq!(
            DomainError::MissingEmail.to_string(),
            "Identity email is missing"
        );
    }
}
