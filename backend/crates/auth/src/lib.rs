//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the session service
//! - `infra/` - PostgreSQL users, Redis / in-memory sessions
//! - `presentation/` - HTTP handlers, DTOs, session gate, router
//!
//! ## Features
//! - Registration and login with user ID + password
//! - Server-side sessions keyed by an opaque cookie token
//! - User ID and password changes that rotate the session
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Session tokens are 64 random bytes; the store only sees their SHA-256
//! - Soft-deleted users are invisible to every lookup

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemorySessionStore, PgUserRepository, RedisSessionStore, SessionBackend};
pub use presentation::router::auth_router;
pub use presentation::{AuthAppState, SessionGate, UserIdentity, require_session};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
