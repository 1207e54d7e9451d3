//! Blog Use Case
//!
//! Create, read, update and delete posts on behalf of a caller. Only the
//! author may view, edit or delete a post; anyone else gets
//! `BlogUnauthorized` and nothing is written.

use std::sync::Arc;

use crate::domain::entities::{Blog, NewBlog};
use crate::domain::repository::BlogRepository;
use crate::domain::value_objects::{BlogContent, BlogId, BlogTitle, UserId};
use crate::error::{BlogError, BlogResult};

pub struct BlogUseCase<B>
where
    B: BlogRepository,
{
    blog_repo: Arc<B>,
}

impl<B> BlogUseCase<B>
where
    B: BlogRepository,
{
    pub fn new(blog_repo: Arc<B>) -> Self {
        Self { blog_repo }
    }

    pub async fn create_blog(
        &self,
        author_id: UserId,
        title: String,
        content: String,
    ) -> BlogResult<Blog> {
        let new_blog = NewBlog {
            author_id,
            title: BlogTitle::new(title)?,
            content: BlogContent::new(content)?,
        };

        let blog = self.blog_repo.create(&new_blog).await?;

        tracing::info!(blog_id = %blog.blog_id, user_id = %author_id, "Blog post created");

        Ok(blog)
    }

    pub async fn get_by_id(&self, caller: &UserId, blog_id: &BlogId) -> BlogResult<Blog> {
        let blog = self.blog_repo.find_by_id(blog_id).await?;
        ensure_author(&blog, caller)?;

        tracing::debug!(blog_id = %blog_id, "Blog post fetched");

        Ok(blog)
    }

    pub async fn list_by_owner(&self, owner: &UserId) -> BlogResult<Vec<Blog>> {
        let blogs = self.blog_repo.find_by_author(owner).await?;

        tracing::debug!(user_id = %owner, count = blogs.len(), "Blog posts listed");

        Ok(blogs)
    }

    /// Replace title and content.
    ///
    /// Input is validated before the post is loaded.
    pub async fn update(
        &self,
        caller: &UserId,
        blog_id: &BlogId,
        title: String,
        content: String,
    ) -> BlogResult<Blog> {
        let title = BlogTitle::new(title)?;
        let content = BlogContent::new(content)?;

        let mut blog = self.blog_repo.find_by_id(blog_id).await?;
        ensure_author(&blog, caller)?;

        blog.revise(title, content);
        let blog = self.blog_repo.update(&blog).await?;

        tracing::info!(blog_id = %blog_id, user_id = %caller, "Blog post updated");

        Ok(blog)
    }

    pub async fn delete(&self, caller: &UserId, blog_id: &BlogId) -> BlogResult<()> {
        let blog = self.blog_repo.find_by_id(blog_id).await?;
        ensure_author(&blog, caller)?;

        self.blog_repo.delete(blog_id).await?;

        tracing::info!(blog_id = %blog_id, user_id = %caller, "Blog post deleted");

        Ok(())
    }
}

fn ensure_author(blog: &Blog, caller: &UserId) -> BlogResult<()> {
    if blog.is_owned_by(caller) {
        Ok(())
    } else {
        tracing::warn!(
            blog_id = %blog.blog_id,
            user_id = %caller,
            "Non-author tried to access blog post"
        );
        Err(BlogError::BlogUnauthorized)
    }
}
