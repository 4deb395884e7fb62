use reqwest::StatusCode;
use thiserror::Error;

/// Longest slice of a non-success response body kept in the error display
const MAX_BODY_DISPLAY: usize = 256;

/// Failure of a single round trip through the transport adapter.
///
/// Every variant keeps enough context (URL, status, underlying cause) for a
/// caller to decide what to do with it. Nothing in this layer retries.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Base URL could not be parsed
    #[error("invalid base URL '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Base URL parsed but is not an http(s) URL usable as a base
    #[error("unsupported base URL '{url}': scheme '{scheme}' is not http or https")]
    UnsupportedScheme { url: String, scheme: String },

    /// Relative request path could not be resolved against the base URL
    #[error("invalid request path '{path}'")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The default HTTP executor could not be built
    #[error("failed to build HTTP executor")]
    Build {
        #[source]
        source: anyhow::Error,
    },

    /// Request body could not be serialized to JSON
    #[error("failed to encode request body")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// Network failure, timeout or executor error before a response arrived
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Server answered with a non-success status
    #[error("unexpected status {status}: {}", truncate_body(.body))]
    Status { status: StatusCode, body: String },

    /// Response body is not valid JSON or does not match the expected shape
    #[error("failed to decode response body (status {status})")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// Body is JSON but not a valid notification response (wrong shape,
    /// recipient state/error pairing, counts). The server may already have
    /// accepted the dispatch; its uuid is kept when the body carried one.
    #[error("invalid notification response (dispatch uuid: {})", .uuid.as_deref().unwrap_or("unknown"))]
    InvalidResponse {
        uuid: Option<String>,
        #[source]
        source: serde_json::Error,
    },

    /// Server answered with a different number of recipients than requested
    #[error("response lists {actual} recipients for {expected} requested (dispatch uuid: {uuid})")]
    RecipientCountMismatch {
        uuid: String,
        expected: usize,
        actual: usize,
    },
}

impl TransportError {
    /// HTTP status of the response, when the failure happened after one arrived
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } | TransportError::Decode { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Server-assigned dispatch id when the server accepted the request but
    /// its answer was rejected. Retrying such a request may send a duplicate.
    pub fn dispatch_uuid(&self) -> Option<&str> {
        match self {
            TransportError::InvalidResponse { uuid, .. } => uuid.as_deref(),
            TransportError::RecipientCountMismatch { uuid, .. } => Some(uuid),
            _ => None,
        }
    }

    /// Whether the failure was a timeout reported by the reqwest executor
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request { source, .. } => source
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout),
            _ => false,
        }
    }
}

fn truncate_body(body: &str) -> &str {
    let body = body.trim();
    if body.len() <= MAX_BODY_DISPLAY {
        return body;
    }
    let mut end = MAX_BODY_DISPLAY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
