//! Service request data models.
//!
//! This module defines the immutable description of an outbound HTTP call:
//! the method, headers, parameters, and an optional body. Requests are built
//! once by the calling test and are never mutated by the invoker.

use std::collections::HashMap;

/// HTTP method of a service call.
///
/// A closed enumeration: the invoker dispatches on these four methods and
/// nothing else, so an unrecognized method is unrepresentable rather than
/// silently falling back to GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP DELETE method - remove a resource
    DELETE,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::PUT => "PUT",
            HttpMethod::POST => "POST",
            HttpMethod::DELETE => "DELETE",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string names a supported method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "PUT" => Some(HttpMethod::PUT),
            "POST" => Some(HttpMethod::POST),
            "DELETE" => Some(HttpMethod::DELETE),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable description of one outbound service call.
///
/// Bundles the headers, HTTP method, an optional path-parameter segment, an
/// optional set of query parameters, and an optional body. Construction is
/// the only way to set any of these; the accessors are read-only.
///
/// No validation is performed beyond what the caller supplies - a malformed
/// header set is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    headers: HashMap<String, String>,
    method: HttpMethod,
    path_parameter: Option<String>,
    query_parameters: Option<HashMap<String, String>>,
    body: Option<String>,
}

impl ServiceRequest {
    /// Creates a request from all of its parts.
    ///
    /// # Arguments
    ///
    /// * `headers` - headers to send with the request
    /// * `method` - HTTP method of the request
    /// * `path_parameter` - path segment appended to the endpoint, if any
    /// * `query_parameters` - query parameters, if any
    /// * `body` - request body, if any
    pub fn new(
        headers: HashMap<String, String>,
        method: HttpMethod,
        path_parameter: Option<String>,
        query_parameters: Option<HashMap<String, String>>,
        body: Option<String>,
    ) -> Self {
        Self {
            headers,
            method,
            path_parameter,
            query_parameters,
            body,
        }
    }

    /// Creates a GET request carrying only headers.
    ///
    /// The method is fixed to GET and parameters and body are fixed to none;
    /// only the headers need to be provided.
    pub fn get(headers: HashMap<String, String>) -> Self {
        Self::new(headers, HttpMethod::GET, None, None, None)
    }

    /// The HTTP method of the request.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The headers to be sent as part of the request.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// The path-parameter segment, if any.
    pub fn path_parameter(&self) -> Option<&str> {
        self.path_parameter.as_deref()
    }

    /// The query parameters, if any.
    pub fn query_parameters(&self) -> Option<&HashMap<String, String>> {
        self.query_parameters.as_ref()
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().map_or(false, |b| !b.is_empty())
    }
}
