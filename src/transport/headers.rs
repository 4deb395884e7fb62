//! Fixed request headers, computed once per client.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::TransportError;

/// Product identifier sent in `User-Agent`
pub fn user_agent() -> String {
    format!("notifications-rs/{}", crate::pkg_version())
}

/// `Basic <base64(username:password)>`
pub fn basic_auth_value(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Builds the header set attached to every request.
///
/// The `Authorization` value is marked sensitive so it never shows up in
/// `Debug` output or logs.
pub fn default_headers(username: &str, password: &str) -> Result<HeaderMap, TransportError> {
    let mut auth = HeaderValue::from_str(&basic_auth_value(username, password))
        .map_err(|e| TransportError::Build { source: e.into() })?;
    auth.set_sensitive(true);

    let agent =
        HeaderValue::from_str(&user_agent()).map_err(|e| TransportError::Build { source: e.into() })?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(USER_AGENT, agent);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}
