//! Session cookie adapter
//!
//! The only place that knows the session travels in a cookie.

use axum::http::{HeaderMap, HeaderValue};
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Read the session token; `SessionInvalid` if absent or malformed
pub fn read_session_token(headers: &HeaderMap, config: &AuthConfig) -> AuthResult<SessionToken> {
    let raw =
        extract_cookie(headers, &config.session_cookie_name).ok_or(AuthError::SessionInvalid)?;
    SessionToken::parse(&raw)
}

pub fn session_cookie(config: &AuthConfig, token: &SessionToken) -> AuthResult<HeaderValue> {
    set_cookie_header(&config.cookie_config(), token.as_str()).ok_or_else(invalid_header)
}

pub fn clear_session_cookie(config: &AuthConfig) -> AuthResult<HeaderValue> {
    delete_cookie_header(&config.cookie_config()).ok_or_else(invalid_header)
}

fn invalid_header() -> AuthError {
    AuthError::Internal("Session cookie is not a valid header value".to_string())
}
