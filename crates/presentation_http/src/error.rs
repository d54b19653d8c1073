//! API error envelope
//!
//! Maps the fixed catalogue of error conditions to HTTP status codes and
//! human-readable messages. Rendering writes only the status code and a
//! JSON body `{"message": "..."}`; underlying error detail is logged by
//! whoever detected it and never serialized to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Presented token was not valid
    #[error("invalid token")]
    InvalidToken,

    /// Caller identity could not be extracted from the request
    #[error("identity not found")]
    IdentityNotFound,

    /// No resource at the requested path
    #[error("resource not found")]
    NotFound,

    /// Caller lacks the tenant admin role
    #[error("user is not a tenant admin")]
    NotTenantAdmin,

    /// Caller lacks both editor-capable roles
    #[error("user is not a tenant admin or service provider admin")]
    NotTenantEditor,

    /// Route exists but not for this method
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Referenced tenant does not exist
    #[error("tenant not found")]
    TenantNotFound,

    /// A lookup that must be unique matched more than once
    #[error("multiple tenants matched")]
    MultipleTenantsFound,

    /// Stored data failed an internal consistency check
    #[error("inconsistent data: {0}")]
    InconsistentData(String),

    /// Request was malformed
    #[error("bad request: {0}")]
    BadRequest(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// User-level status message
    pub message: String,
}

impl ApiError {
    /// Status code this error renders with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidToken | Self::IdentityNotFound => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotTenantAdmin | Self::NotTenantEditor | Self::TenantNotFound => {
                StatusCode::FORBIDDEN
            }
            // The original catalogue used 503 here; 405 is the intended
            // semantic, see DESIGN.md.
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MultipleTenantsFound => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InconsistentData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Fixed user-facing message this error renders with
    pub fn message(&self) -> String {
        match self {
            Self::InvalidToken => "Invalid Token.".to_string(),
            Self::IdentityNotFound => "Identity not found.".to_string(),
            Self::NotFound => "Resource not found.".to_string(),
            Self::NotTenantAdmin => "User not tenant admin.".to_string(),
            Self::NotTenantEditor => {
                "User not tenant admin or service-provider-admin.".to_string()
            }
            Self::MethodNotAllowed => "Method not allowed.".to_string(),
            Self::TenantNotFound => "Tenant not found.".to_string(),
            Self::MultipleTenantsFound => {
                "Multiple tenants found with the same search string.".to_string()
            }
            Self::InconsistentData(detail) | Self::BadRequest(detail) => detail.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_not_found_is_unauthorized() {
        assert_eq!(
            ApiError::IdentityNotFound.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::IdentityNotFound.message(), "Identity not found.");
    }

    #[test]
    fn not_found_is_404_with_fixed_message() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotFound.message(), "Resource not found.");
    }

    #[test]
    fn method_not_allowed_is_405() {
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::MethodNotAllowed.message(), "Method not allowed.");
    }

    #[test]
    fn role_errors_are_forbidden() {
        assert_eq!(ApiError::NotTenantAdmin.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotTenantEditor.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::TenantNotFound.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn detail_variants_surface_their_detail() {
        let err = ApiError::InconsistentData("record count mismatch".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message(), "record count mismatch");

        let err = ApiError::BadRequest("missing field".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "missing field");
    }

    #[test]
    fn body_serializes_as_message_envelope() {
        let body = ErrorBody {
            message: "Resource not found.".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"message":"Resource not found."}"#
        );
    }
}
