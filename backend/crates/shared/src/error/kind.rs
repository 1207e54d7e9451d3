//! Error Kind
//!
//! [`AppError`](super::app_error::AppError) の分類。各バリアントが一つの
//! HTTP ステータスに対応します。

use std::fmt;

use serde::Serialize;

/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert_eq!(ErrorKind::Conflict.default_code(), "CONFLICT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力値の形式・範囲が不正
    BadRequest,
    /// 資格情報またはセッションが無効
    Unauthorized,
    /// 他ユーザーのリソース
    Forbidden,
    NotFound,
    /// 一意制約との競合
    Conflict,
    InternalServerError,
    /// DB / キャッシュに到達できない
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    /// 理由フレーズ（Problem Details の `title`）
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::Conflict => "Conflict",
            Self::InternalServerError => "Internal Server Error",
            Self::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// ドメイン側がコードを付けなかったときの値
    pub const fn default_code(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalServerError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorKind; 7] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
    ];

    #[test]
    fn test_status_codes_are_distinct() {
        let mut codes: Vec<u16> = ALL.iter().map(ErrorKind::status_code).collect();
        codes.dedup();
        assert_eq!(codes, vec![400, 401, 403, 404, 409, 500, 503]);
    }

    #[test]
    fn test_default_codes_are_screaming_snake_case() {
        for kind in ALL {
            assert!(
                kind.default_code()
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c == '_')
            );
        }
    }

    #[test]
    fn test_serializes_as_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::ServiceUnavailable).unwrap(),
            "\"SERVICE_UNAVAILABLE\""
        );
    }
}
