//! Domain Entities

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{BlogContent, BlogId, BlogTitle, UserId};

/// A persisted blog post
#[derive(Debug, Clone)]
pub struct Blog {
    pub blog_id: BlogId,
    /// Fixed at creation
    pub author_id: UserId,
    pub title: BlogTitle,
    pub content: BlogContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Blog {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.author_id == *user_id
    }

    /// Replace the editable fields
    pub fn revise(&mut self, title: BlogTitle, content: BlogContent) {
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub author_id: UserId,
    pub title: BlogTitle,
    pub content: BlogContent,
}
