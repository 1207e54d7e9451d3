//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Blog entity, title/content rules, repository trait
//! - `application/` - Blog use case (ownership lives here)
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every route sits behind `auth::require_session`; the caller's identity
//! comes from `auth::UserIdentity`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::BlogUseCase;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::{BlogAppState, blog_router};
