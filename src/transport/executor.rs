//! Pluggable HTTP executor.
//!
//! The transport adapter never talks to the network itself; it hands a fully
//! resolved request to an [`HttpExecutor`]. `reqwest::Client` implements the
//! trait, so an embedding application can pass its own pre-configured client
//! (proxy, TLS roots, timeouts) or a completely custom executor.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

use crate::error::TransportError;

/// Default overall request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default TCP connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A single, fully resolved HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Raw HTTP response: status plus the complete body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Performs one HTTP round trip.
///
/// Implementations must not retry and must not interpret the status code;
/// any response that arrives is returned as-is. Errors are reserved for
/// failures where no response was obtained (connection refused, timeout, ...).
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse>;
}

#[async_trait]
impl HttpExecutor for reqwest::Client {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        let mut builder = self
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// Builds the reqwest client used when the caller does not supply an executor.
///
/// # Features
/// - **Timeouts**: overall request timeout and connect timeout
/// - **Connection pooling**: idle connections kept per host
/// - **Compression**: gzip response decoding
/// - **Security**: Rustls for TLS
pub fn default_http_client(
    timeout: Duration,
    connect_timeout: Duration,
) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // Compression
        .gzip(true)
        .build()
        .map_err(|e| TransportError::Build { source: e.into() })
}
