//! Transport adapter.
//!
//! Executes one HTTP call against a configured base URL with a fixed header
//! set and decodes the JSON body into a typed value. Connection pooling,
//! TLS and timeouts belong to the [`HttpExecutor`] underneath.

mod adapter;
mod executor;
mod headers;
mod path;

pub use adapter::Transport;
pub use executor::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, HttpExecutor, HttpRequest, HttpResponse,
    default_http_client,
};
pub use headers::{basic_auth_value, default_headers, user_agent};
pub use path::escape_path_segment;
