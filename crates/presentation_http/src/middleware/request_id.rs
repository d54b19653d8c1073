//! Request ID middleware
//!
//! Every request gets a correlation token at the edge of the chain: a
//! caller-supplied `X-Request-Id` is adopted when it parses as a UUID,
//! anything else is replaced with a fresh v4. The token lives in the
//! request extensions for the rest of the chain and is reflected on the
//! response header so callers can quote it back.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{body::Body, extract::Request, http::header::HeaderValue, response::Response};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Per-request correlation token, available from request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// The id as a UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The caller's id, if it is a well-formed UUID
fn inbound_request_id(request: &Request<Body>) -> Option<Uuid> {
    let value = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    Uuid::parse_str(value).ok()
}

/// Layer that assigns a request id to every request
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service that adopts or generates the request id
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let request_id = inbound_request_id(&request).unwrap_or_else(Uuid::new_v4);
        request.extensions_mut().insert(RequestId(request_id));

        // All log lines for this request, including the access log line,
        // land inside this span.
        let span = tracing::info_span!(
            "request",
            id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
        );

        let mut inner = self.inner.clone();
        let reflect = async move {
            let mut response = inner.call(request).await?;
            if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                response.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Ok(response)
        };

        Box::pin(reflect.instrument(span))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        Router::new()
            .route(
                "/",
                get(|axum::Extension(id): axum::Extension<RequestId>| async move {
                    id.to_string()
                }),
            )
            .layer(RequestIdLayer::new())
    }

    #[tokio::test]
    async fn generates_an_id_when_none_sent() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let reflected = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(reflected.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn adopts_a_well_formed_inbound_id() {
        let id = Uuid::new_v4();
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let reflected = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert_eq!(reflected.to_str().unwrap(), id.to_string());
    }

    #[tokio::test]
    async fn replaces_a_malformed_inbound_id() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let reflected = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(reflected.to_str().unwrap()).is_ok());
    }

    #[test]
    fn inbound_id_helper_rejects_garbage() {
        let request = Request::builder()
            .uri("/")
            .header(REQUEST_ID_HEADER, "not-a-uuid")
            .body(Body::empty())
            .unwrap();
        assert!(inbound_request_id(&request).is_none());

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert!(inbound_request_id(&request).is_none());
    }

    #[test]
    fn request_id_display_matches_uuid() {
        let id = RequestId(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(id.as_uuid(), Uuid::nil());
    }
}
