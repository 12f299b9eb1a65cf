//! Typed response model for the session endpoint.

use serde::{Deserialize, Serialize};

/// Response body of the session endpoint.
///
/// A plain holder for the deserialized fields; every field is optional so
/// that partial bodies still map. Whether the body was populated at all is
/// checked by the invoker, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: Option<String>,
    pub email: Option<String>,
    pub client_locale: Option<String>,
    pub client_timezone: Option<String>,
    pub success_message: Option<String>,
    pub account_id: Option<i64>,
    pub organization_id: Option<i64>,
}
