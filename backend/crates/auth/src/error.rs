//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::domain::value_object::user_name::UserNameError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or out-of-range input (user name, password)
    #[error("{0}")]
    Validation(String),

    /// Unknown user name or wrong password
    #[error("Invalid user ID or password")]
    InvalidCredentials,

    /// Session cookie missing, malformed or unknown to the store
    #[error("Session not found or expired")]
    SessionInvalid,

    /// The claimed current user ID is not the session's user
    #[error("Current user ID does not match the signed-in user")]
    IdentityMismatch,

    #[error("User not found")]
    UserNotFound,

    #[error("User ID is already taken")]
    UserNameTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session store error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::IdentityMismatch => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::Database(e) => classify_sqlx(e),
            AuthError::Cache(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Stable machine-readable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "INVALID_INPUT",
            AuthError::InvalidCredentials => "AUTHENTICATION_FAILED",
            AuthError::SessionInvalid => "SESSION_INVALID",
            AuthError::IdentityMismatch => "USER_ID_MISMATCH",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserNameTaken => "USER_ALREADY_EXISTS",
            AuthError::Database(_) => "DATABASE_ERROR",
            AuthError::Cache(_) => "SESSION_STORE_UNAVAILABLE",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to AppError
    ///
    /// Storage details stay in the logs; clients get a generic message.
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::Database(_) | AuthError::Cache(_) | AuthError::Internal(_) => {
                self.kind().as_str().to_string()
            }
            _ => self.to_string(),
        };
        let err = AppError::new(self.kind(), message).with_code(self.code());
        match self {
            AuthError::SessionInvalid => err.with_action("Please log in again"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Cache(e) => {
                tracing::error!(error = %e, "Session store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::IdentityMismatch => {
                tracing::warn!("User ID change attempted with a foreign current ID");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::Mismatch => AuthError::InvalidCredentials,
            other => AuthError::Internal(other.to_string()),
        }
    }
}
