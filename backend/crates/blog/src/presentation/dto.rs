//! API DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Blog;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditBlogRequest {
    pub id: i64,
    pub title: String,
    pub content: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Blog> for BlogResponse {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.blog_id.value(),
            author_id: blog.author_id.value(),
            title: blog.title.as_str().to_string(),
            content: blog.content.as_str().to_string(),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogEnvelope {
    pub code: &'static str,
    pub message: &'static str,
    pub blog: BlogResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogListResponse {
    pub code: &'static str,
    pub message: &'static str,
    pub blogs: Vec<BlogResponse>,
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMeta {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub code: &'static str,
    pub message: &'static str,
}
