//! Typed HTTP service invocation layer for API test automation.
//!
//! This crate is a thin helper layer for tests that talk to an HTTP+JSON
//! service: it issues requests, maps successful responses into typed serde
//! structs, and asserts basic success/failure conditions. HTTP execution is
//! delegated to reqwest's blocking client and deserialization to serde;
//! failures surface synchronously as test failures.
//!
//! # Architecture
//!
//! - **models**: immutable request descriptions, the raw response holder,
//!   and typed response structs
//! - **invoker**: executes one request/response cycle per call, generic over
//!   the response type
//! - **session**: explicit per-test-session cookie state passed into every
//!   call, so parallel test sessions never share hidden state
//! - **formatter**: JSON pretty-printing for failure diagnostics
//!
//! # Usage
//!
//! ```no_run
//! use std::collections::HashMap;
//! use service_client::{ServiceInvoker, ServiceRequest, SessionResponse, SessionState};
//!
//! let mut headers = HashMap::new();
//! headers.insert("Accept".to_string(), "application/json".to_string());
//!
//! let mut session = SessionState::new();
//! let mut service: ServiceInvoker<SessionResponse> =
//!     ServiceInvoker::new(ServiceRequest::get(headers), "http://localhost:8080/session");
//!
//! service.invoke(&mut session).expect("service call failed");
//!
//! let response = service.response().expect("call was not successful");
//! println!("token: {:?}", response.token);
//! ```
//!
//! A call is classified successful only on HTTP 200. On success the body is
//! deserialized into the typed response and the test fails loudly if that
//! produces nothing; on any other status the typed response stays unset and
//! the raw status and body remain available for diagnostics.

pub mod formatter;
pub mod invoker;
pub mod models;
pub mod session;

pub use invoker::{InvokeError, ServiceInvoker};
pub use models::request::{HttpMethod, ServiceRequest};
pub use models::response::ServiceResponse;
pub use models::session::SessionResponse;
pub use session::{SessionState, REMEMBER_ME_COOKIE, SESSION_COOKIE};
