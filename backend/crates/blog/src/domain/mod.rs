//! Domain Layer
//!
//! - Entities (Blog, NewBlog)
//! - Value objects (BlogTitle, BlogContent)
//! - Repository trait

pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{Blog, NewBlog};
pub use repository::BlogRepository;
pub use value_objects::{BlogContent, BlogId, BlogTitle, UserId};
