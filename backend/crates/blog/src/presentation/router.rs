//! Blog Router

use auth::{SessionGate, require_session};
use auth::domain::repository::SessionRepository;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::domain::repository::BlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the Blog router; every route requires a session from `gate`
pub fn blog_router<B, S>(state: BlogAppState<B>, gate: SessionGate<S>) -> Router
where
    B: BlogRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_blogs::<B>))
        .route("/blog/post", post(handlers::create_blog::<B>))
        .route("/blog/overview/post/{id}", get(handlers::get_blog::<B>))
        .route("/blog/edit", post(handlers::edit_blog::<B>))
        .route("/blog/delete/{id}", get(handlers::delete_blog::<B>))
        .route_layer(from_fn_with_state(gate, require_session::<S>))
        .with_state(state)
}
