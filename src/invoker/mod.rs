//! Service invoker.
//!
//! This module orchestrates one request/response cycle against a configured
//! endpoint: it builds an HTTP call from a [`ServiceRequest`], executes it
//! synchronously through reqwest's blocking client, captures cookies into
//! the caller's [`SessionState`], measures the round trip, classifies the
//! outcome, and - only on success - maps the body into the typed response.
//!
//! The invoker is generic over the response type, so one endpoint needs one
//! request descriptor and one serde struct rather than a subclass.

pub mod error;

pub use error::InvokeError;

use crate::formatter::format_json_pretty;
use crate::models::request::{HttpMethod, ServiceRequest};
use crate::models::response::{parse_set_cookie, ServiceResponse};
use crate::session::SessionState;
use reqwest::blocking::multipart;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::DELETE => reqwest::Method::DELETE,
        }
    }
}

/// Executes one service call and holds its outcome.
///
/// `R` is the typed response model the body is deserialized into on
/// success. The `Serialize` bound exists so the mapped value can be compared
/// back against the raw body to detect fields the model does not recognize.
///
/// # Examples
///
/// ```no_run
/// use std::collections::HashMap;
/// use service_client::{ServiceInvoker, ServiceRequest, SessionResponse, SessionState};
///
/// let mut headers = HashMap::new();
/// headers.insert("Accept".to_string(), "application/json".to_string());
///
/// let mut session = SessionState::new();
/// let mut service: ServiceInvoker<SessionResponse> =
///     ServiceInvoker::new(ServiceRequest::get(headers), "http://localhost:8080/session");
///
/// service.invoke(&mut session).expect("service call failed");
/// let response = service.response().expect("call was not successful");
/// assert_eq!(response.token.as_deref(), Some("abc"));
/// ```
pub struct ServiceInvoker<R> {
    request: ServiceRequest,
    endpoint: String,
    raw_response: Option<ServiceResponse>,
    response: Option<R>,
    unrecognized_fields: Vec<String>,
}

impl<R> ServiceInvoker<R>
where
    R: DeserializeOwned + Serialize,
{
    /// Creates an invoker for one endpoint.
    ///
    /// # Arguments
    ///
    /// * `request` - the request model to send
    /// * `endpoint` - the base URI of the service
    pub fn new(request: ServiceRequest, endpoint: impl Into<String>) -> Self {
        Self {
            request,
            endpoint: endpoint.into(),
            raw_response: None,
            response: None,
            unrecognized_fields: Vec::new(),
        }
    }

    /// Executes the service call.
    ///
    /// Builds the URL from the endpoint and the optional path parameter,
    /// applies query parameters and headers, attaches the stored session
    /// cookie if any, attaches the body if any, dispatches on the HTTP
    /// method, and blocks until the round trip completes. Cookies returned
    /// by the service are absorbed into `session` and the elapsed time is
    /// logged.
    ///
    /// A call is successful only on HTTP 200; only then is the body mapped
    /// into the typed response.
    ///
    /// # Errors
    ///
    /// Transport failures (connect, timeout, TLS, invalid endpoint) are
    /// returned as [`InvokeError`] and should fail the invoking test.
    ///
    /// # Panics
    ///
    /// Panics if the service reported success but the body could not be
    /// mapped into `R` - that is a test failure, not a recoverable error.
    pub fn invoke(&mut self, session: &mut SessionState) -> Result<(), InvokeError> {
        self.execute(session, None)
    }

    /// Executes the service call with a multipart file body.
    ///
    /// Identical to [`invoke`](Self::invoke) except that the body is a
    /// multipart form carrying `file` as its single part, under the control
    /// name `file` with the filename taken from the path.
    pub fn invoke_form_data(
        &mut self,
        session: &mut SessionState,
        file: &Path,
    ) -> Result<(), InvokeError> {
        let form = multipart::Form::new().file("file", file)?;
        self.execute(session, Some(form))
    }

    /// The typed response mapped from the last successful call.
    ///
    /// `None` before the first successful invoke, and after any failed one.
    pub fn response(&self) -> Option<&R> {
        self.response.as_ref()
    }

    /// The raw outcome of the last call, for diagnostics.
    pub fn raw_response(&self) -> Option<&ServiceResponse> {
        self.raw_response.as_ref()
    }

    /// Whether the last call returned HTTP 200.
    pub fn successful(&self) -> bool {
        self.raw_response
            .as_ref()
            .map_or(false, ServiceResponse::is_success)
    }

    /// The status code of the last call.
    ///
    /// # Panics
    ///
    /// Panics if no call has been made yet.
    pub fn status_code(&self) -> u16 {
        match &self.raw_response {
            Some(raw) => raw.status_code,
            None => panic!("status_code requested before any service call was made"),
        }
    }

    /// The status line of the last call.
    ///
    /// # Panics
    ///
    /// Panics if no call has been made yet.
    pub fn status_line(&self) -> String {
        match &self.raw_response {
            Some(raw) => format!("{} {}", raw.status_code, raw.status_text),
            None => panic!("status_line requested before any service call was made"),
        }
    }

    /// The last response body, pretty-printed when it is JSON.
    ///
    /// Used for failure diagnostics; a body that is not valid JSON is
    /// returned as-is, and an empty string is returned before any call.
    pub fn exception_message(&self) -> String {
        let raw = match &self.raw_response {
            Some(raw) => raw,
            None => return String::new(),
        };
        let body = String::from_utf8_lossy(&raw.body);
        format_json_pretty(&body).unwrap_or_else(|_| body.into_owned())
    }

    /// Fields of the last successful response body that the typed model did
    /// not recognize. Recorded and logged, never fatal.
    pub fn unrecognized_fields(&self) -> &[String] {
        &self.unrecognized_fields
    }

    /// Fails the test if the previous call *did* succeed.
    ///
    /// Negative-path helper: call after invoking an endpoint that is
    /// expected to reject the request.
    pub fn assert_call_was_not_successful(&self) {
        if let Some(raw) = &self.raw_response {
            assert!(
                !raw.is_success(),
                "The service returned a {} {}",
                raw.status_code,
                raw.status_text
            );
        }
    }

    fn execute(
        &mut self,
        session: &mut SessionState,
        form: Option<multipart::Form>,
    ) -> Result<(), InvokeError> {
        let url = self.build_url()?;
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| InvokeError::BuildError(e.to_string()))?;

        let mut builder = client.request(self.request.method().into(), &url);

        if let Some(parameters) = self.request.query_parameters() {
            builder = builder.query(parameters);
        }
        for (name, value) in self.request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookie) = session.cookie_header() {
            builder = builder.header(reqwest::header::COOKIE, cookie);
        }
        builder = match form {
            Some(form) => builder.multipart(form),
            None => match self.request.body() {
                Some(body) => builder.body(body.to_string()),
                None => builder,
            },
        };

        let started = Instant::now();
        let response = builder.send()?;
        let raw = read_response(response, started)?;

        session.absorb(&raw);
        log::info!(
            "{} {} responded with {} {} in {}ms",
            self.request.method(),
            url,
            raw.status_code,
            raw.status_text,
            raw.elapsed_millis()
        );

        self.response = None;
        self.unrecognized_fields.clear();
        let successful = raw.is_success();
        self.raw_response = Some(raw);
        if successful {
            self.map_response();
        }
        Ok(())
    }

    /// Joins the endpoint and the optional path parameter into the call URL.
    fn build_url(&self) -> Result<String, InvokeError> {
        let parsed = url::Url::parse(&self.endpoint)?;
        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(InvokeError::UnsupportedProtocol(format!(
                "Only HTTP and HTTPS are supported, got: {}",
                scheme
            )));
        }

        let base = self.endpoint.trim_end_matches('/');
        Ok(match self.request.path_parameter() {
            Some(path) => format!("{}/{}", base, path.trim_start_matches('/')),
            None => base.to_string(),
        })
    }

    /// Maps the stored raw body into the typed response.
    ///
    /// Panics when the body does not produce a value, embedding the status
    /// code and status line the service reported alongside the empty body.
    fn map_response(&mut self) {
        let (value, status_code, status_text) = match &self.raw_response {
            Some(raw) => (
                serde_json::from_slice::<Value>(&raw.body).ok(),
                raw.status_code,
                raw.status_text.clone(),
            ),
            None => return,
        };

        let mapped = value
            .as_ref()
            .and_then(|body| serde_json::from_value::<R>(body.clone()).ok());
        let mapped = match mapped {
            Some(mapped) => mapped,
            None => panic!(
                "The response body was not populated but the service reported a {} {}",
                status_code, status_text
            ),
        };

        if let (Some(actual), Ok(known)) = (value.as_ref(), serde_json::to_value(&mapped)) {
            let mut unrecognized = Vec::new();
            collect_unrecognized_fields(actual, &known, "", &mut unrecognized);
            for field in &unrecognized {
                log::warn!("unrecognized field `{}` in response body", field);
            }
            self.unrecognized_fields = unrecognized;
        }
        self.response = Some(mapped);
    }
}

/// Drains a reqwest response into a [`ServiceResponse`].
///
/// Headers whose values are not valid UTF-8 are skipped. Cookies are parsed
/// from every `Set-Cookie` header before the body is consumed. The duration
/// covers dispatch through complete body download.
fn read_response(
    response: reqwest::blocking::Response,
    started: Instant,
) -> Result<ServiceResponse, InvokeError> {
    let status_code = response.status().as_u16();
    let status_text = response
        .status()
        .canonical_reason()
        .unwrap_or("Unknown")
        .to_string();

    let mut headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value) = value.to_str() {
            headers.insert(name.as_str().to_string(), value.to_string());
        }
    }

    let mut cookies = HashMap::new();
    for value in response.headers().get_all(reqwest::header::SET_COOKIE) {
        if let Some((name, value)) = value.to_str().ok().and_then(parse_set_cookie) {
            cookies.insert(name, value);
        }
    }

    let body = response.bytes()?.to_vec();

    Ok(ServiceResponse {
        status_code,
        status_text,
        headers,
        cookies,
        body,
        duration: started.elapsed(),
    })
}

/// Records every path present in `actual` but absent from `known`.
///
/// Both trees come from the same body: `actual` is the raw parse, `known`
/// the typed model serialized back. Only object keys can be unrecognized;
/// arrays are walked index-wise so nested objects are still covered.
fn collect_unrecognized_fields(actual: &Value, known: &Value, path: &str, out: &mut Vec<String>) {
    match (actual, known) {
        (Value::Object(actual_map), Value::Object(known_map)) => {
            for (key, actual_value) in actual_map {
                let field_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                match known_map.get(key) {
                    Some(known_value) => {
                        collect_unrecognized_fields(actual_value, known_value, &field_path, out)
                    }
                    None => out.push(field_path),
                }
            }
        }
        (Value::Array(actual_items), Value::Array(known_items)) => {
            for (index, (actual_item, known_item)) in
                actual_items.iter().zip(known_items).enumerate()
            {
                let item_path = format!("{}[{}]", path, index);
                collect_unrecognized_fields(actual_item, known_item, &item_path, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionResponse;
    use serde_json::json;
    use std::collections::HashMap;

    fn invoker(endpoint: &str) -> ServiceInvoker<SessionResponse> {
        ServiceInvoker::new(ServiceRequest::get(HashMap::new()), endpoint)
    }

    #[test]
    fn test_method_converts_to_reqwest_method() {
        assert_eq!(reqwest::Method::from(HttpMethod::GET), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(HttpMethod::PUT), reqwest::Method::PUT);
        assert_eq!(
            reqwest::Method::from(HttpMethod::POST),
            reqwest::Method::POST
        );
        assert_eq!(
            reqwest::Method::from(HttpMethod::DELETE),
            reqwest::Method::DELETE
        );
    }

    #[test]
    fn test_build_url_without_path_parameter() {
        let url = invoker("http://localhost:8080").build_url().unwrap();
        assert_eq!(url, "http://localhost:8080");
    }

    #[test]
    fn test_build_url_joins_path_parameter() {
        let request = ServiceRequest::new(
            HashMap::new(),
            HttpMethod::GET,
            Some("/session".to_string()),
            None,
            None,
        );
        let service: ServiceInvoker<SessionResponse> =
            ServiceInvoker::new(request, "http://localhost:8080/");

        assert_eq!(
            service.build_url().unwrap(),
            "http://localhost:8080/session"
        );
    }

    #[test]
    fn test_build_url_rejects_unsupported_protocol() {
        let result = invoker("ftp://example.com").build_url();
        assert!(matches!(result, Err(InvokeError::UnsupportedProtocol(_))));
    }

    #[test]
    fn test_build_url_rejects_malformed_endpoint() {
        let result = invoker("not a url").build_url();
        assert!(matches!(result, Err(InvokeError::InvalidUrl(_))));
    }

    #[test]
    fn test_fresh_invoker_exposes_nothing() {
        let service = invoker("http://localhost:8080");

        assert!(service.response().is_none());
        assert!(service.raw_response().is_none());
        assert!(!service.successful());
        assert!(service.unrecognized_fields().is_empty());
        assert_eq!(service.exception_message(), "");
        // No prior call means there is nothing to have succeeded.
        service.assert_call_was_not_successful();
    }

    #[test]
    #[should_panic(expected = "before any service call")]
    fn test_status_code_panics_before_any_call() {
        invoker("http://localhost:8080").status_code();
    }

    #[test]
    fn test_collect_unrecognized_fields_flat() {
        let actual = json!({"token": "abc", "extra": 1});
        let known = json!({"token": "abc"});
        let mut out = Vec::new();

        collect_unrecognized_fields(&actual, &known, "", &mut out);

        assert_eq!(out, vec!["extra".to_string()]);
    }

    #[test]
    fn test_collect_unrecognized_fields_nested() {
        let actual = json!({
            "account": {"id": 1, "shadow": true},
            "items": [{"name": "a", "surprise": 2}]
        });
        let known = json!({
            "account": {"id": 1},
            "items": [{"name": "a"}]
        });
        let mut out = Vec::new();

        collect_unrecognized_fields(&actual, &known, "", &mut out);

        assert!(out.contains(&"account.shadow".to_string()));
        assert!(out.contains(&"items[0].surprise".to_string()));
    }

    #[test]
    fn test_collect_unrecognized_fields_none_when_shapes_match() {
        let actual = json!({"token": "abc", "email": null});
        let known = json!({"token": "abc", "email": null});
        let mut out = Vec::new();

        collect_unrecognized_fields(&actual, &known, "", &mut out);

        assert!(out.is_empty());
    }
}
