use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::executor::{HttpExecutor, HttpRequest};
use crate::error::TransportError;

/// Executes JSON round trips against a fixed base URL with a fixed header set.
///
/// A `Transport` holds no mutable state; it can be shared across tasks and
/// used concurrently. Each call is a single request with no retry and no
/// caching. Dropping the returned future cancels the underlying request.
#[derive(Clone)]
pub struct Transport {
    base_url: Url,
    headers: HeaderMap,
    executor: Arc<dyn HttpExecutor>,
}

impl Transport {
    /// Creates a transport for `base_url`.
    ///
    /// The base URL must be an absolute http(s) URL. A trailing `/` is added
    /// when missing so that relative paths extend the base path instead of
    /// replacing its last segment.
    pub fn new(
        base_url: &str,
        headers: HeaderMap,
        executor: Arc<dyn HttpExecutor>,
    ) -> Result<Self, TransportError> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            base_url,
            headers,
            executor,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a relative path against the base URL
    pub fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| TransportError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }

    /// `GET path`, decoding the JSON body into `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        self.execute(Method::GET, path, None).await
    }

    /// `POST path` with a JSON body, decoding the JSON response into `T`
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body).map_err(|source| TransportError::Encode { source })?;
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Performs one round trip and decodes the response body.
    ///
    /// Any non-2xx status is a [`TransportError::Status`], even when the
    /// body happens to be valid JSON.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, TransportError> {
        let url = self.resolve(path)?;

        let mut headers = self.headers.clone();
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        tracing::debug!(method = %method, url = %url, "sending request");
        let start = Instant::now();

        let request = HttpRequest {
            method: method.clone(),
            url: url.clone(),
            headers,
            body,
        };
        let response = self.executor.send(request).await.map_err(|source| {
            tracing::warn!(method = %method, url = %url, error = %source, "request failed");
            TransportError::Request {
                url: url.to_string(),
                source,
            }
        })?;

        tracing::debug!(
            method = %method,
            url = %url,
            status = response.status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "received response"
        );

        if !response.status.is_success() {
            tracing::warn!(
                method = %method,
                url = %url,
                status = response.status.as_u16(),
                "unexpected response status"
            );
            return Err(TransportError::Status {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| TransportError::Decode {
            status: response.status,
            source,
        })
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Sensitive header values print as `Sensitive`
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| TransportError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(TransportError::UnsupportedScheme {
            url: raw.to_string(),
            scheme: url.scheme().to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
