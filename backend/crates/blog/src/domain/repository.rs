//! Repository Traits

use crate::domain::entities::{Blog, NewBlog};
use crate::domain::value_objects::{BlogId, UserId};
use crate::error::BlogResult;

/// Blog post persistence
///
/// Soft-deleted posts are invisible: lookups, updates and deletes all
/// answer `BlogError::BlogNotFound` for them.
#[trait_variant::make(BlogRepository: Send)]
pub trait LocalBlogRepository {
    async fn create(&self, blog: &NewBlog) -> BlogResult<Blog>;

    async fn find_by_id(&self, blog_id: &BlogId) -> BlogResult<Blog>;

    /// Newest first
    async fn find_by_author(&self, author_id: &UserId) -> BlogResult<Vec<Blog>>;

    /// Persist `title` and `content` of an existing post in one transaction
    async fn update(&self, blog: &Blog) -> BlogResult<Blog>;

    /// Soft delete
    async fn delete(&self, blog_id: &BlogId) -> BlogResult<()>;
}
