//! Value Object Module

pub mod session_token;
pub mod user_name;
pub mod user_password;

/// Numeric surrogate key, shared with the blog domain
pub use kernel::id::UserId;
