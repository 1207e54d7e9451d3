//! Session Token Value Object
//!
//! セッション Cookie に載せる不透明なトークン。
//!
//! ## 形式
//! - OS 乱数 64 バイト → URL-safe Base64（パディングなし）= 86 文字
//! - ストアのキーには生のトークンではなく SHA-256 ダイジェストを使う

use std::fmt;

use platform::crypto::{from_base64_url, random_bytes, sha256, to_base64_url};

use crate::error::{AuthError, AuthResult};

/// Number of random bytes behind a token
pub const SESSION_TOKEN_BYTES: usize = 64;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token
    pub fn generate() -> Self {
        Self(to_base64_url(&random_bytes(SESSION_TOKEN_BYTES)))
    }

    /// Parse a token read from a cookie
    ///
    /// Anything that is not exactly 64 bytes of URL-safe Base64 is
    /// `SessionInvalid`, so garbage never reaches the store.
    pub fn parse(raw: &str) -> AuthResult<Self> {
        match from_base64_url(raw) {
            Ok(bytes) if bytes.len() == SESSION_TOKEN_BYTES => Ok(Self(raw.to_string())),
            _ => Err(AuthError::SessionInvalid),
        }
    }

    /// Cookie value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digest used as the store key
    pub fn storage_key(&self) -> String {
        to_base64_url(&sha256(self.0.as_bytes()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
