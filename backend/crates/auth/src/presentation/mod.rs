//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, cookie adapter and middleware.

pub mod cookie;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{SessionGate, UserIdentity, require_session};
pub use router::auth_router;
