//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use kernel::id::ParseIdError;
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    /// Title or content outside the allowed range
    #[error("{0}")]
    Validation(String),

    /// Blog ID that is not a positive integer
    #[error("Invalid blog ID: {0}")]
    InvalidId(String),

    /// Caller is not the author
    #[error("You do not have access to this blog post")]
    BlogUnauthorized,

    #[error("Blog post not found")]
    BlogNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BlogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::Validation(_) | BlogError::InvalidId(_) => ErrorKind::BadRequest,
            BlogError::BlogUnauthorized => ErrorKind::Forbidden,
            BlogError::BlogNotFound => ErrorKind::NotFound,
            BlogError::Database(e) => classify_sqlx(e),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> &'static str {
        match self {
            BlogError::Validation(_) => "INVALID_BLOG_ENTITY",
            BlogError::InvalidId(_) => "INVALID_BLOG_ID",
            BlogError::BlogUnauthorized => "BLOG_ACCESS_DENIED",
            BlogError::BlogNotFound => "BLOG_NOT_FOUND",
            BlogError::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            BlogError::Database(_) => self.kind().as_str().to_string(),
            _ => self.to_string(),
        };
        AppError::new(self.kind(), message).with_code(self.code())
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ParseIdError> for BlogError {
    fn from(err: ParseIdError) -> Self {
        BlogError::InvalidId(err.0)
    }
}
