//! Service response data models.
//!
//! This module defines the raw result of one service call: status
//! information, headers, cookies, the body, and the measured round-trip
//! time. Typed response models are deserialized from the body by the
//! invoker; this structure keeps the unmapped view for diagnostics.

use std::collections::HashMap;
use std::time::Duration;

/// Raw outcome of one HTTP round trip.
///
/// Cookies are parsed out of every `Set-Cookie` header during extraction
/// and kept separately, because a flat header map can only hold one value
/// per header name while a response may set several cookies at once.
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    /// HTTP status code (e.g., 200, 401, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Unauthorized").
    pub status_text: String,

    /// Response headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Cookies set by the response, as name-value pairs.
    pub cookies: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Round-trip time from dispatch to complete body download.
    pub duration: Duration,
}

impl ServiceResponse {
    /// Creates a new ServiceResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: String) -> Self {
        Self {
            status_code,
            status_text,
            headers: HashMap::new(),
            cookies: HashMap::new(),
            body: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Checks if the call was successful.
    ///
    /// Success means exactly HTTP 200; any other status, including other
    /// 2xx codes, counts as a failed call.
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Looks up a cookie set by this response.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// The round-trip time in whole milliseconds.
    pub fn elapsed_millis(&self) -> u128 {
        self.duration.as_millis()
    }

    /// Attempts to parse the response body as UTF-8 text.
    pub fn body_as_string(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }
}

/// Parses one `Set-Cookie` header value into a name-value pair.
///
/// Only the leading `name=value` pair is kept; attributes such as `Path`
/// or `HttpOnly` after the first `;` are ignored.
pub(crate) fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let pair = header.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
