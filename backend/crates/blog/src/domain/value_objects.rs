//! Domain Value Objects

use std::fmt;

use serde::Serialize;

use crate::error::{BlogError, BlogResult};

pub use kernel::id::{BlogId, UserId};

/// Post title, 1 to 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlogTitle(String);

impl BlogTitle {
    pub const MAX_CHARS: usize = 50;

    pub fn new(raw: impl Into<String>) -> BlogResult<Self> {
        let raw = raw.into();
        check_length("title", &raw, Self::MAX_CHARS)?;
        if raw.chars().any(char::is_control) {
            return Err(BlogError::Validation(
                "title must not contain control characters".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// Rows were validated on the way in
    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlogTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Post body, 1 to 8000 characters; line breaks allowed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlogContent(String);

impl BlogContent {
    pub const MAX_CHARS: usize = 8000;

    pub fn new(raw: impl Into<String>) -> BlogResult<Self> {
        let raw = raw.into();
        check_length("content", &raw, Self::MAX_CHARS)?;
        Ok(Self(raw))
    }

    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lengths count Unicode scalar values, not bytes
fn check_length(field: &str, value: &str, max: usize) -> BlogResult<()> {
    if value.trim().is_empty() {
        return Err(BlogError::Validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max {
        return Err(BlogError::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}
