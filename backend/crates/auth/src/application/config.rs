//! Application Configuration
//!
//! Cookie and session settings for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Whether to set the `Secure` attribute
    pub cookie_secure: bool,
    /// Whether to set the `HttpOnly` attribute
    pub cookie_http_only: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Optional `Domain` attribute
    pub cookie_domain: Option<String>,
    /// Session lifetime; `None` keeps sessions until logout
    pub session_ttl: Option<Duration>,
    /// Prefix for keys in the session cache
    pub session_key_prefix: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_id".to_string(),
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Lax,
            cookie_domain: None,
            session_ttl: None,
            session_key_prefix: "session:".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Cookie settings for the session cookie
    ///
    /// `Max-Age` follows the session TTL so the cookie and the cache
    /// entry expire together.
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: self.cookie_http_only,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            domain: self.cookie_domain.clone(),
            max_age_secs: self.session_ttl.map(|ttl| ttl.as_secs() as i64),
        }
    }
}
