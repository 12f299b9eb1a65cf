//! Per-test-session cookie state.
//!
//! Each logical test session owns one `SessionState` and passes it into
//! every invoke. Parallel test threads using distinct states cannot observe
//! each other's cookies, and nothing is stored process-wide.

use crate::models::response::ServiceResponse;

/// Name of the session cookie exchanged with the service.
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Name of the "remember me" cookie issued on persistent logins.
pub const REMEMBER_ME_COOKIE: &str = "REMEMBER_ME";

/// Cookie state carried across the calls of one logical test session.
///
/// The session id is re-sent on every subsequent request; the remember-me
/// token is stored for inspection only and is never re-sent.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session_id: Option<String>,
    remember_me: Option<String>,
}

impl SessionState {
    /// Creates an empty session state with no stored cookies.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored session id, if a call has set one.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The stored remember-me token, if the most recent call set one.
    pub fn remember_me(&self) -> Option<&str> {
        self.remember_me.as_deref()
    }

    /// Renders the outbound `Cookie` header value, if a session id is stored.
    pub fn cookie_header(&self) -> Option<String> {
        self.session_id
            .as_ref()
            .map(|id| format!("{}={}", SESSION_COOKIE, id))
    }

    /// Applies the cookie rules for one completed call.
    ///
    /// The session id is overwritten when the response carries one and kept
    /// otherwise. The remember-me token is taken from the response when
    /// present and cleared when absent.
    pub fn absorb(&mut self, response: &ServiceResponse) {
        if let Some(id) = response.cookie(SESSION_COOKIE) {
            self.session_id = Some(id.to_string());
        }
        self.remember_me = response.cookie(REMEMBER_ME_COOKIE).map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_cookies(cookies: &[(&str, &str)]) -> ServiceResponse {
        let mut response = ServiceResponse::new(200, "OK".to_string());
        for (name, value) in cookies {
            response
                .cookies
                .insert(name.to_string(), value.to_string());
        }
        response
    }

    #[test]
    fn test_new_state_has_no_cookies() {
        let state = SessionState::new();

        assert_eq!(state.session_id(), None);
        assert_eq!(state.remember_me(), None);
        assert_eq!(state.cookie_header(), None);
    }

    #[test]
    fn test_absorb_stores_both_cookies() {
        let mut state = SessionState::new();
        state.absorb(&response_with_cookies(&[
            (SESSION_COOKIE, "abc123"),
            (REMEMBER_ME_COOKIE, "token"),
        ]));

        assert_eq!(state.session_id(), Some("abc123"));
        assert_eq!(state.remember_me(), Some("token"));
        assert_eq!(state.cookie_header(), Some("JSESSIONID=abc123".to_string()));
    }

    #[test]
    fn test_session_id_is_kept_when_response_omits_it() {
        let mut state = SessionState::new();
        state.absorb(&response_with_cookies(&[(SESSION_COOKIE, "abc123")]));
        state.absorb(&response_with_cookies(&[]));

        assert_eq!(state.session_id(), Some("abc123"));
    }

    #[test]
    fn test_remember_me_is_cleared_when_response_omits_it() {
        let mut state = SessionState::new();
        state.absorb(&response_with_cookies(&[
            (SESSION_COOKIE, "abc123"),
            (REMEMBER_ME_COOKIE, "token"),
        ]));
        state.absorb(&response_with_cookies(&[(SESSION_COOKIE, "def456")]));

        assert_eq!(state.session_id(), Some("def456"));
        assert_eq!(state.remember_me(), None);
    }
}
