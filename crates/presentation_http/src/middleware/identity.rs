//! Caller identity middleware
//!
//! Extracts the caller identity from fixed upstream headers on every
//! inbound request: `X-Auth-Subject`, `X-Auth-Email` (required), and
//! `X-Auth-Roles` (comma-separated). A request without an email is
//! short-circuited with `401 {"message":"Identity not found."}` and the
//! inner service is never called. Otherwise the identity is inserted into
//! the request extensions and handlers receive it through
//! `Extension<UserIdentity>`.
//!
//! Boundary assumption: headers are trusted as-is, with no signature or
//! token verification. This is only sound when the service runs behind an
//! authenticating reverse proxy that sets these headers itself.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    body::Body,
    extract::Request,
    response::{IntoResponse, Response},
};
use domain::UserIdentity;
use tower::{Layer, Service};

use crate::error::ApiError;

/// Header carrying the caller's subject claim
pub const AUTH_SUBJECT_HEADER: &str = "X-Auth-Subject";

/// Header carrying the caller's email claim; required
pub const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";

/// Header carrying the caller's comma-separated roles
pub const AUTH_ROLES_HEADER: &str = "X-Auth-Roles";

/// Build a [`UserIdentity`] from the trusted request headers
///
/// # Errors
///
/// Returns [`ApiError::IdentityNotFound`] when the email header is absent
/// or empty.
pub fn identity_from_headers(request: &Request<Body>) -> Result<UserIdentity, ApiError> {
    let header = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    };

    let subject = header(AUTH_SUBJECT_HEADER);
    let email = header(AUTH_EMAIL_HEADER);
    let roles = UserIdentity::parse_roles(header(AUTH_ROLES_HEADER));

    UserIdentity::new(subject, email, roles).map_err(|_| ApiError::IdentityNotFound)
}

/// Layer that applies identity extraction to every request
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLayer;

impl IdentityLayer {
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityService { inner }
    }
}

/// Middleware service extracting the caller identity
#[derive(Debug, Clone)]
pub struct IdentityService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for IdentityService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let identity = identity_from_headers(&request);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match identity {
                Ok(identity) => {
                    request.extensions_mut().insert(identity);
                    inner.call(request).await
                }
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}
