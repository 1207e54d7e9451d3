//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, OWASP default parameters)
//! - Zeroization of clear text on drop
//! - Optional application-wide pepper
//!
//! The policy here only covers what every account password must satisfy.
//! Length bounds follow the account rules of this service (4..=20).

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in Unicode scalar values
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Maximum password length in Unicode scalar values
pub const MAX_PASSWORD_LENGTH: usize = 20;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed (entropy or library error)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a parseable PHC string
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// The password does not match the stored hash
    #[error("Password does not match")]
    Mismatch,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone`
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("hunter2".to_string()).unwrap();
/// assert_eq!(format!("{password:?}"), "ClearTextPassword(\"[REDACTED]\")");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate and wrap a raw password.
    ///
    /// Unicode is normalized using NFKC before validation, and the length is
    /// counted in code points rather than bytes.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        // Wrap immediately so every early return below still zeroizes.
        let candidate = Self(normalized);

        if candidate.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = candidate.0.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if candidate.0.chars().any(char::is_control) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(candidate)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, parameters, salt and hash,
/// so it can be stored in a single text column.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Credential Hasher
// ============================================================================

/// Argon2id hasher bound to an optional application-wide pepper.
///
/// Built once at startup and shared behind an `Arc`.
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, CredentialHasher};
///
/// let hasher = CredentialHasher::new(None);
/// let password = ClearTextPassword::new("s3cret".to_string()).unwrap();
/// let hashed = hasher.hash(&password).unwrap();
/// assert!(hasher.verify(&hashed, &password).is_ok());
/// ```
#[derive(Clone, Default)]
pub struct CredentialHasher {
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl CredentialHasher {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            pepper: pepper.filter(|p| !p.is_empty()).map(Zeroizing::new),
        }
    }

    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut bytes = password.as_bytes().to_vec();
        if let Some(pepper) = &self.pepper {
            bytes.extend_from_slice(pepper);
        }
        Zeroizing::new(bytes)
    }

    /// Hash a password with a fresh 16-byte salt.
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(password), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns [`PasswordHashError::Mismatch`] when the password is wrong.
    /// Argon2 compares digests in constant time.
    pub fn verify(
        &self,
        hashed: &HashedPassword,
        password: &ClearTextPassword,
    ) -> Result<(), PasswordHashError> {
        let parsed =
            PasswordHash::new(&hashed.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Argon2::default()
            .verify_password(&self.peppered(password), &parsed)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => PasswordHashError::Mismatch,
                other => PasswordHashError::HashingFailed(other.to_string()),
            })
    }

    /// True when the stored hash was produced by something other than Argon2id.
    pub fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        match PasswordHash::new(&hashed.hash) {
            Ok(parsed) => parsed.algorithm != argon2::Algorithm::Argon2id.ident(),
            Err(_) => true,
        }
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new(raw.to_string()).unwrap()
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(matches!(
            ClearTextPassword::new("abc".to_string()),
            Err(PasswordPolicyError::TooShort { min: 4, actual: 3 })
        ));
        assert!(ClearTextPassword::new("abcd".to_string()).is_ok());
        assert!(ClearTextPassword::new("a".repeat(20)).is_ok());
        assert!(matches!(
            ClearTextPassword::new("a".repeat(21)),
            Err(PasswordPolicyError::TooLong { max: 20, actual: 21 })
        ));
    }

    #[test]
    fn test_password_whitespace_only() {
        assert!(matches!(
            ClearTextPassword::new("      ".to_string()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_control_character() {
        assert!(matches!(
            ClearTextPassword::new("abc\u{0007}def".to_string()),
            Err(PasswordPolicyError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_unicode_password_counts_code_points() {
        // 5 code points, 15 bytes
        assert!(ClearTextPassword::new("パスワード".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = CredentialHasher::new(None);
        let hashed = hasher.hash(&pw("correct1")).unwrap();

        assert!(hasher.verify(&hashed, &pw("correct1")).is_ok());
        assert!(matches!(
            hasher.verify(&hashed, &pw("wrong1")),
            Err(PasswordHashError::Mismatch)
        ));
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = CredentialHasher::new(Some(b"pepper".to_vec()));
        let plain = CredentialHasher::new(None);
        let hashed = peppered.hash(&pw("secret")).unwrap();

        assert!(peppered.verify(&hashed, &pw("secret")).is_ok());
        assert!(matches!(
            plain.verify(&hashed, &pw("secret")),
            Err(PasswordHashError::Mismatch)
        ));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = CredentialHasher::default();
        let a = hasher.hash(&pw("same-pw")).unwrap();
        let b = hasher.hash(&pw("same-pw")).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_phc_string_roundtrip_and_rehash() {
        let hasher = CredentialHasher::default();
        let hashed = hasher.hash(&pw("secret")).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&restored, &pw("secret")).is_ok());
        assert!(!hasher.needs_rehash(&restored));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(matches!(
            HashedPassword::from_phc_string("not_a_valid_hash"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", pw("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
