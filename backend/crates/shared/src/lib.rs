//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Unified error type with stable machine-readable codes
//! - Typed numeric identifiers shared by the user and blog domains
//! - HTTP extractors that keep rejections inside the unified error shape
//! - Request ID echo for error bodies
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
#[cfg(feature = "axum")]
pub mod request_id;
