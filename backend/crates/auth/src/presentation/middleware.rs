//! Session Gate Middleware
//!
//! Resolves the session cookie once per request and hands the result to
//! handlers as a typed [`UserIdentity`].

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::SessionService;
use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{UserId, session_token::SessionToken};
use crate::error::AuthError;
use crate::presentation::cookie::read_session_token;

/// Who is calling, as established by [`require_session`]
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub user_id: UserId,
    pub session_token: SessionToken,
}

impl<S> FromRequestParts<S> for UserIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserIdentity>()
            .cloned()
            .ok_or(AuthError::SessionInvalid)
    }
}

/// Middleware state
#[derive(Clone)]
pub struct SessionGate<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<S> SessionGate<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }
}

/// Middleware that requires a valid session
///
/// Use with `axum::middleware::from_fn_with_state(gate, require_session::<S>)`.
pub async fn require_session<S>(
    State(gate): State<SessionGate<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let session_token = read_session_token(req.headers(), &gate.config)?;
    let user_id = SessionService::new(gate.sessions.clone())
        .get(&session_token)
        .await?;

    tracing::debug!(user_id = %user_id, "Session resolved");

    req.extensions_mut().insert(UserIdentity {
        user_id,
        session_token,
    });

    Ok(next.run(req).await)
}
