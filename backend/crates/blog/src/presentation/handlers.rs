//! HTTP Handlers
//!
//! All handlers run behind the session gate and take the caller from
//! [`UserIdentity`].

use auth::UserIdentity;
use axum::Json;
use axum::extract::{Path, State};
use kernel::extract::AppJson;
use std::sync::Arc;

use crate::application::BlogUseCase;
use crate::domain::repository::BlogRepository;
use crate::domain::value_objects::BlogId;
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    BlogEnvelope, BlogListResponse, BlogResponse, CreateBlogRequest, EditBlogRequest, ListMeta,
    MessageResponse,
};

#[derive(Clone)]
pub struct BlogAppState<B>
where
    B: BlogRepository + Clone + Send + Sync + 'static,
{
    pub blogs: Arc<B>,
}

impl<B> BlogAppState<B>
where
    B: BlogRepository + Clone + Send + Sync + 'static,
{
    pub fn new(blogs: B) -> Self {
        Self {
            blogs: Arc::new(blogs),
        }
    }

    fn use_case(&self) -> BlogUseCase<B> {
        BlogUseCase::new(self.blogs.clone())
    }
}

/// GET /
pub async fn list_blogs<B>(
    State(state): State<BlogAppState<B>>,
    identity: UserIdentity,
) -> BlogResult<Json<BlogListResponse>>
where
    B: BlogRepository + Clone + Send + Sync + 'static,
{
    let blogs: Vec<BlogResponse> = state
        .use_case()
        .list_by_owner(&identity.user_id)
        .await?
        .iter()
        .map(BlogResponse::from)
        .collect();

    Ok(Json(BlogListResponse {
        code: "BLOG_FETCHED",
        message: "Blog posts",
        meta: ListMeta { count: blogs.len() },
        blogs,
    }))
}

/// POST /blog/post
pub async fn create_blog<B>(
    State(state): State<BlogAppState<B>>,
    identity: UserIdentity,
    AppJson(req): AppJson<CreateBlogRequest>,
) -> BlogResult<Json<BlogEnvelope>>
where
    B: BlogRepository + Clone + Send + Sync + 'static,
{
    let blog = state
        .use_case()
        .create_blog(identity.user_id, req.title, req.content)
        .await?;

    Ok(Json(BlogEnvelope {
        code: "BLOG_CREATED",
        message: "Blog post created",
        blog: BlogResponse::from(&blog),
    }))
}

/// GET /blog/overview/post/{id}
pub async fn get_blog<B>(
    State(state): State<BlogAppState<B>>,
    identity: UserIdentity,
    Path(raw_id): Path<String>,
) -> BlogResult<Json<BlogEnvelope>>
where
    B: BlogRepository + Clone + Send + Sync + 'static,
{
    let blog_id: BlogId = raw_id.parse()?;
    let blog = state
        .use_case()
        .get_by_id(&identity.user_id, &blog_id)
        .await?;

    Ok(Json(BlogEnvelope {
        code: "BLOG_FETCHED",
        message: "Blog post",
        blog: BlogResponse::from(&blog),
    }))
}

/// POST /blog/edit
pub async fn edit_blog<B>(
    State(state): State<BlogAppState<B>>,
    identity: UserIdentity,
    AppJson(req): AppJson<EditBlogRequest>,
) -> BlogResult<Json<BlogEnvelope>>
where
    B: BlogRepository + Clone + Send + Sync + 'static,
{
    if req.id <= 0 {
        return Err(BlogError::InvalidId(req.id.to_string()));
    }
    let blog = state
        .use_case()
        .update(
            &identity.user_id,
            &BlogId::new(req.id),
            req.title,
            req.content,
        )
        .await?;

    Ok(Json(BlogEnvelope {
        code: "BLOG_UPDATED",
        message: "Blog post updated",
        blog: BlogResponse::from(&blog),
    }))
}

/// GET /blog/delete/{id}
pub async fn delete_blog<B>(
    State(state): State<BlogAppState<B>>,
    identity: UserIdentity,
    Path(raw_id): Path<String>,
) -> BlogResult<Json<MessageResponse>>
where
    B: BlogRepository + Clone + Send + Sync + 'static,
{
    let blog_id: BlogId = raw_id.parse()?;
    state
        .use_case()
        .delete(&identity.user_id, &blog_id)
        .await?;

    Ok(Json(MessageResponse {
        code: "BLOG_DELETED",
        message: "Blog post deleted",
    }))
}
