//! User Password Value Object
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] is validated user input (4..=20 chars, zeroized on drop)
//! - [`UserPassword`] is the stored Argon2id PHC string
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::CredentialHasher;
//!
//! let hasher = CredentialHasher::new(None);
//! let raw = RawPassword::new("hunter2".to_string()).unwrap();
//! let stored = UserPassword::from_raw(&raw, &hasher).unwrap();
//! assert!(stored.verify(&raw, &hasher).is_ok());
//! ```

use platform::password::{ClearTextPassword, CredentialHasher, HashedPassword};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a raw password. Policy violations become `AuthError::Validation`.
    pub fn new(raw: String) -> AuthResult<Self> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed password as persisted in `users.password_hash`
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, hasher: &CredentialHasher) -> AuthResult<Self> {
        Ok(Self(hasher.hash(raw.inner())?))
    }

    /// Restore from the stored PHC string
    pub fn from_phc(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AuthError::Internal(format!("Stored password hash is unreadable: {e}")))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `Err(AuthError::InvalidCredentials)` on mismatch
    pub fn verify(&self, raw: &RawPassword, hasher: &CredentialHasher) -> AuthResult<()> {
        hasher.verify(&self.0, raw.inner())?;
        Ok(())
    }

    pub fn needs_rehash(&self, hasher: &CredentialHasher) -> bool {
        hasher.needs_rehash(&self.0)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
