//! Backend HTTP client
//!
//! A thin wrapper around `reqwest::Client` for calls to backend APIs. Each
//! call is described by a [`RequestDescriptor`] built fresh per call; the
//! client resolves the descriptor's API to a configured base URL, issues
//! exactly one request with no retries, maps any status of 300 or above to
//! an error, and logs latency and outcome around every call. The caller's
//! request id is propagated on the `X-Request-Id` header.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::{Client, Method, StatusCode, header};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;

/// Header name for request correlation
pub const X_REQUEST_ID: &str = "x-request-id";

/// Connection timeout for backend calls
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for backend calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend APIs this service is wired to call
///
/// Each variant resolves to a base URL from the configuration. Only one
/// backend is wired today; add a variant and a config field per new API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendApi {
    /// The sample backend configured via `backend_url`
    Backend,
}

impl fmt::Display for BackendApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => write!(f, "backend"),
        }
    }
}

/// Errors raised by backend calls
#[derive(Debug, Error)]
pub enum BackendError {
    /// The target API has no base URL configured
    #[error("No base URL configured for {0} API")]
    UnconfiguredApi(BackendApi),

    /// The request could not be issued or completed
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    ///
    /// The response body is logged, never carried here.
    #[error("Unsuccessful response from backend: {status}")]
    UnexpectedStatus { status: StatusCode },

    /// The response body was not the expected JSON shape
    #[error("Unable to decode backend response")]
    Decode(#[source] serde_json::Error),
}

/// Description of one outbound HTTP call before it is issued
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Correlation id of the inbound request that triggered this call
    pub request_id: Uuid,
    /// Which backend API to call
    pub api: BackendApi,
    /// Path relative to the API's base URL
    pub uri: String,
    /// HTTP method
    pub method: Method,
    /// Extra headers to forward
    pub headers: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Bytes>,
}

impl RequestDescriptor {
    /// Describe a call with no extra headers and no body
    pub fn new(
        api: BackendApi,
        method: Method,
        uri: impl Into<String>,
        request_id: Uuid,
    ) -> Self {
        Self {
            request_id,
            api,
            uri: uri.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Describe a GET call
    pub fn get(api: BackendApi, uri: impl Into<String>, request_id: Uuid) -> Self {
        Self::new(api, Method::GET, uri, request_id)
    }

    /// Add a header to forward with the call
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body
    ///
    /// A `Content-Type: application/json` header is added only when a body
    /// is present.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Join a base URL and a path with exactly one separating slash
fn join_url(base: &str, uri: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        uri.trim_start_matches('/')
    )
}

/// Client for outbound backend calls
///
/// Built once at startup and shared read-only across requests. Fails fast
/// if the underlying client cannot be constructed.
#[derive(Debug, Clone)]
pub struct BackendClient {
    inner: Client,
    backend_url: String,
}

impl BackendClient {
    /// Create a client from the service configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let inner = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("glue/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner,
            backend_url: config.backend_url.clone(),
        })
    }

    /// Resolve an API identifier to its configured base URL
    fn base_url(&self, api: BackendApi) -> Result<&str, BackendError> {
        match api {
            BackendApi::Backend if self.backend_url.is_empty() => {
                Err(BackendError::UnconfiguredApi(api))
            }
            BackendApi::Backend => Ok(&self.backend_url),
        }
    }

    /// Issue the described request and return the response body
    ///
    /// Latency, API, method, URI, and request id are logged regardless of
    /// outcome. Any status of 300 or above is an error; the offending
    /// response body is logged but not surfaced to the caller.
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<Bytes, BackendError> {
        let started = Instant::now();
        let result = self.dispatch(descriptor).await;

        info!(
            latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            api = %descriptor.api,
            method = %descriptor.method,
            uri = %descriptor.uri,
            request_id = %descriptor.request_id,
            "backend request"
        );

        result
    }

    async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<Bytes, BackendError> {
        let base = self.base_url(descriptor.api)?;
        let url = join_url(base, &descriptor.uri);

        debug!(url = %url, method = %descriptor.method, "dispatching backend request");

        let mut request = self
            .inner
            .request(descriptor.method.clone(), url.as_str())
            .header(X_REQUEST_ID, descriptor.request_id.to_string());

        for (name, value) in &descriptor.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &descriptor.body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status >= StatusCode::MULTIPLE_CHOICES {
            warn!(
                url = %url,
                status = status.as_u16(),
                response_body = %String::from_utf8_lossy(&body),
                "unsuccessful backend response"
            );
            return Err(BackendError::UnexpectedStatus { status });
        }

        debug!(url = %url, status = status.as_u16(), "successful backend response");
        Ok(body)
    }

    /// Sample GET request to the backend
    ///
    /// Replace with the actual calls your service makes; this exists to
    /// show the descriptor/send/decode shape end to end.
    pub async fn fetch_sample(
        &self,
        request_id: Uuid,
    ) -> Result<HashMap<String, String>, BackendError> {
        let descriptor = RequestDescriptor::get(BackendApi::Backend, "/endpoint", request_id);
        let body = self.send(&descriptor).await?;

        serde_json::from_slice(&body).map_err(|e| {
            error!(
                response_body = %String::from_utf8_lossy(&body),
                "unable to decode backend response"
            );
            BackendError::Decode(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_single_slash_between_parts() {
        assert_eq!(join_url("http://x/", "/endpoint"), "http://x/endpoint");
        assert_eq!(join_url("http://x", "/endpoint"), "http://x/endpoint");
        assert_eq!(join_url("http://x/", "endpoint"), "http://x/endpoint");
        assert_eq!(join_url("http://x", "endpoint"), "http://x/endpoint");
    }

    #[test]
    fn descriptor_get_has_no_body_or_headers() {
        let id = Uuid::new_v4();
        let descriptor = RequestDescriptor::get(BackendApi::Backend, "/endpoint", id);
        assert_eq!(descriptor.method, Method::GET);
        assert_eq!(descriptor.uri, "/endpoint");
        assert_eq!(descriptor.request_id, id);
        assert!(descriptor.headers.is_empty());
        assert!(descriptor.body.is_none());
    }

    #[test]
    fn descriptor_builders_accumulate() {
        let descriptor =
            RequestDescriptor::new(BackendApi::Backend, Method::POST, "/endpoint", Uuid::new_v4())
                .with_header("x-custom", "yes")
                .with_body(r#"{"k":"v"}"#.as_bytes());
        assert_eq!(
            descriptor.headers,
            vec![("x-custom".to_string(), "yes".to_string())]
        );
        assert_eq!(descriptor.body, Some(Bytes::from_static(br#"{"k":"v"}"#)));
    }

    #[test]
    fn unconfigured_backend_url_is_an_error() {
        let client = BackendClient::new(&AppConfig::default()).unwrap();
        let err = client.base_url(BackendApi::Backend).unwrap_err();
        assert!(matches!(err, BackendError::UnconfiguredApi(BackendApi::Backend)));
    }

    #[test]
    fn unexpected_status_error_does_not_mention_a_body() {
        let err = BackendError::UnexpectedStatus {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "Unsuccessful response from backend: 404 Not Found"
        );
    }
}
