//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod manage_user;
pub mod session;

// Re-exports
pub use authenticate::AuthUseCase;
pub use config::AuthConfig;
pub use manage_user::UserUseCase;
pub use session::SessionService;
