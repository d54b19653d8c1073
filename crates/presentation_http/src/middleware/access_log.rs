//! Access log middleware
//!
//! Emits exactly one structured log line per request on completion, with
//! latency, final status, response byte count, client address, method, and
//! path. Sits first in the chain after request-id assignment so the line
//! lands inside the request span.

use std::{
    future::Future,
    net::SocketAddr,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use axum::{
    body::{Body, HttpBody},
    extract::{ConnectInfo, Request},
    response::Response,
};
use tower::{Layer, Service};
use tracing::info;

/// Layer that applies access logging to every request
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLogLayer;

impl AccessLogLayer {
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogService { inner }
    }
}

/// Service that logs one line per completed request
#[derive(Debug, Clone)]
pub struct AccessLogService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for AccessLogService<S>
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

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let client = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.to_string());

        let started = Instant::now();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(request).await?;

            let bytes = response.body().size_hint().exact().unwrap_or(0);
            info!(
                latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                status = response.status().as_u16(),
                bytes,
                client_ip = client.as_deref().unwrap_or("unknown"),
                method = %method,
                path = %path,
                "client request"
            );

            Ok(response)
        })
    }
}
