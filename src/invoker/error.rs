//! Service invocation error types.
//!
//! This module defines the transport-level errors that can occur while
//! executing a service call. They surface as `Err` from the invoker and are
//! expected to fail the invoking test; assertion failures on mapped
//! responses are panics, not variants here.

use std::fmt;

/// Errors that can occur while executing a service call.
#[derive(Debug)]
pub enum InvokeError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    NetworkError(String),

    /// Request timed out before completion.
    Timeout,

    /// The endpoint could not be parsed as a URL.
    InvalidUrl(String),

    /// TLS/SSL error occurred during HTTPS connection.
    TlsError(String),

    /// Request building error.
    ///
    /// Errors that occur when constructing the HTTP request from
    /// the request model.
    BuildError(String),

    /// The endpoint uses a scheme other than HTTP or HTTPS.
    UnsupportedProtocol(String),

    /// A file destined for a multipart part could not be read.
    FileError(String),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            InvokeError::Timeout => write!(f, "Request timed out"),
            InvokeError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            InvokeError::TlsError(msg) => write!(f, "TLS/SSL error: {}", msg),
            InvokeError::BuildError(msg) => write!(f, "Request build error: {}", msg),
            InvokeError::UnsupportedProtocol(protocol) => {
                write!(f, "Unsupported protocol: {}", protocol)
            }
            InvokeError::FileError(msg) => write!(f, "File error: {}", msg),
        }
    }
}

impl std::error::Error for InvokeError {}

/// Convert reqwest errors to InvokeError.
///
/// Maps reqwest's error types to our variants for consistent handling in
/// test diagnostics.
impl From<reqwest::Error> for InvokeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InvokeError::Timeout
        } else if err.is_connect() || err.is_request() {
            InvokeError::NetworkError(err.to_string())
        } else if err.is_builder() {
            InvokeError::BuildError(err.to_string())
        } else if err.to_string().contains("certificate")
            || err.to_string().contains("TLS")
            || err.to_string().contains("SSL")
        {
            InvokeError::TlsError(err.to_string())
        } else {
            InvokeError::NetworkError(err.to_string())
        }
    }
}

/// Convert URL parsing errors to InvokeError.
impl From<url::ParseError> for InvokeError {
    fn from(err: url::ParseError) -> Self {
        InvokeError::InvalidUrl(err.to_string())
    }
}

/// Convert file I/O errors (multipart uploads) to InvokeError.
impl From<std::io::Error> for InvokeError {
    fn from(err: std::io::Error) -> Self {
        InvokeError::FileError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let network_err = InvokeError::NetworkError("Connection refused".to_string());
        assert_eq!(
            format!("{}", network_err),
            "Network error: Connection refused"
        );

        let timeout_err = InvokeError::Timeout;
        assert_eq!(format!("{}", timeout_err), "Request timed out");

        let invalid_url_err = InvokeError::InvalidUrl("not a url".to_string());
        assert_eq!(format!("{}", invalid_url_err), "Invalid URL: not a url");

        let protocol_err = InvokeError::UnsupportedProtocol("ftp".to_string());
        assert_eq!(format!("{}", protocol_err), "Unsupported protocol: ftp");

        let file_err = InvokeError::FileError("missing.txt".to_string());
        assert_eq!(format!("{}", file_err), "File error: missing.txt");
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: &dyn std::error::Error = &InvokeError::Timeout;
        assert_eq!(format!("{}", err), "Request timed out");
    }

    #[test]
    fn test_io_error_converts_to_file_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: InvokeError = io_err.into();
        assert!(matches!(err, InvokeError::FileError(_)));
    }

    #[test]
    fn test_url_error_converts_to_invalid_url() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: InvokeError = parse_err.into();
        assert!(matches!(err, InvokeError::InvalidUrl(_)));
    }
}
