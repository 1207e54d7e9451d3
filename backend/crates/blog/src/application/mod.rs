//! Application Layer

pub mod manage_blog;

pub use manage_blog::BlogUseCase;
