//! Application Error
//!
//! ドメインクレートのエラーが HTTP 境界で最終的に変換される型。

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Text = Cow<'static, str>;

/// 統一エラー型
///
/// レスポンスに出るのは `kind` / `code` / `message` / `action` のみ。
/// `source` はログ専用で、クライアントには返しません。
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Forbidden, "Not the author")
///     .with_code("BLOG_ACCESS_DENIED");
/// assert_eq!(err.status_code(), 403);
/// assert_eq!(err.code(), "BLOG_ACCESS_DENIED");
/// ```
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    code: Text,
    message: Text,
    action: Option<Text>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// `code` は `kind` の既定コードで始まる
    pub fn new(kind: ErrorKind, message: impl Into<Text>) -> Self {
        Self {
            kind,
            code: Cow::Borrowed(kind.default_code()),
            message: message.into(),
            action: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// 機械可読コード（例: `SESSION_INVALID`）
    pub fn with_code(mut self, code: impl Into<Text>) -> Self {
        self.code = code.into();
        self
    }

    /// クライアントへの次の行動の提案（例: 再ログイン）
    pub fn with_action(mut self, action: impl Into<Text>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status_code(), self.code, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_code_follows_kind() {
        let err = AppError::not_found("Blog not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.message(), "Blog not found");
        assert!(err.action().is_none());

        assert_eq!(AppError::bad_request("x").code(), "BAD_REQUEST");
        assert_eq!(AppError::internal("x").code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_builders() {
        let err = AppError::new(ErrorKind::Unauthorized, "Session expired")
            .with_code("SESSION_INVALID")
            .with_action("Please log in again");
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.code(), "SESSION_INVALID");
        assert_eq!(err.action(), Some("Please log in again"));
    }

    #[test]
    fn test_source_is_kept_for_logging() {
        let cause = std::io::Error::other("disk full");
        let err = AppError::internal("Failed").with_source(cause);
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk full"));
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("User not found").with_code("USER_NOT_FOUND");
        assert_eq!(err.to_string(), "404 USER_NOT_FOUND: User not found");
    }
}
