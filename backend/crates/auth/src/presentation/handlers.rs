//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use kernel::extract::AppJson;
use platform::password::CredentialHasher;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{AuthUseCase, SessionService, UserUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::cookie::{clear_session_cookie, read_session_token, session_cookie};
use crate::presentation::dto::{
    CredentialsRequest, LoginIdResponse, MessageResponse, UpdatePasswordRequest,
    UpdateUserIdRequest, UserEnvelope, UserResponse,
};
use crate::presentation::middleware::{SessionGate, UserIdentity};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<U, S>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub hasher: Arc<CredentialHasher>,
    pub config: Arc<AuthConfig>,
}

impl<U, S> AuthAppState<U, S>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(users: U, sessions: S, hasher: Arc<CredentialHasher>, config: AuthConfig) -> Self {
        Self {
            users: Arc::new(users),
            sessions: Arc::new(sessions),
            hasher,
            config: Arc::new(config),
        }
    }

    /// Gate state sharing this state's session store and cookie settings
    pub fn session_gate(&self) -> SessionGate<S> {
        SessionGate::new(self.sessions.clone(), self.config.clone())
    }

    fn auth_use_case(&self) -> AuthUseCase<U> {
        AuthUseCase::new(self.users.clone(), self.hasher.clone())
    }

    fn user_use_case(&self) -> UserUseCase<U> {
        UserUseCase::new(self.users.clone(), self.hasher.clone())
    }

    fn session_service(&self) -> SessionService<S> {
        SessionService::new(self.sessions.clone())
    }
}

// ============================================================================
// Registration / Login
// ============================================================================

/// POST /regist
pub async fn register<U, S>(
    State(state): State<AuthAppState<U, S>>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> AuthResult<Json<UserEnvelope>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state
        .user_use_case()
        .create_user(&req.user_id, req.password)
        .await?;

    Ok(Json(UserEnvelope {
        code: "USER_CREATED",
        message: "User registered",
        user: UserResponse::from(&user),
    }))
}

/// POST /login
pub async fn login<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
    AppJson(req): AppJson<CredentialsRequest>,
) -> AuthResult<Response>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state
        .auth_use_case()
        .authenticate(&req.user_id, req.password)
        .await?;

    let sessions = state.session_service();
    // A browser logging in again gets a fresh token; its previous one is dropped.
    if let Ok(previous) = read_session_token(&headers, &state.config) {
        sessions.delete(&previous).await?;
    }
    let token = sessions.create(user.user_id).await?;
    let cookie = session_cookie(&state.config, &token)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserEnvelope {
            code: "LOGIN_SUCCEEDED",
            message: "Logged in",
            user: UserResponse::from(&user),
        }),
    )
        .into_response())
}

/// GET /login
///
/// Reports who the cookie belongs to without going through the gate.
pub async fn login_status<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserEnvelope>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = read_session_token(&headers, &state.config)?;
    let user_id = state.session_service().get(&token).await?;

    let user = match state.auth_use_case().get_user_by_id(&user_id).await {
        Ok(user) => user,
        // Session outlived its user
        Err(AuthError::UserNotFound) => return Err(AuthError::SessionInvalid),
        Err(e) => return Err(e),
    };

    Ok(Json(UserEnvelope {
        code: "USER_FETCHED",
        message: "Signed-in user",
        user: UserResponse::from(&user),
    }))
}

// ============================================================================
// Session-gated
// ============================================================================

/// POST /logout
pub async fn logout<U, S>(
    State(state): State<AuthAppState<U, S>>,
    identity: UserIdentity,
) -> AuthResult<Response>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    state
        .session_service()
        .delete(&identity.session_token)
        .await?;

    tracing::info!(user_id = %identity.user_id, "User logged out");

    let cookie = clear_session_cookie(&state.config)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            code: "LOGGED_OUT",
            message: "Logged out",
        }),
    )
        .into_response())
}

/// GET /api/login-id
pub async fn login_id<U, S>(
    State(state): State<AuthAppState<U, S>>,
    identity: UserIdentity,
) -> AuthResult<Json<LoginIdResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state
        .auth_use_case()
        .get_user_by_id(&identity.user_id)
        .await?;

    Ok(Json(LoginIdResponse {
        code: "LOGIN_ID_FETCHED",
        message: "Signed-in user ID",
        id: user.user_id.value(),
        user_id: user.user_name.into_inner(),
    }))
}

/// POST /update/id
pub async fn update_user_id<U, S>(
    State(state): State<AuthAppState<U, S>>,
    identity: UserIdentity,
    AppJson(req): AppJson<UpdateUserIdRequest>,
) -> AuthResult<Response>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state
        .user_use_case()
        .update_user_name(&identity.user_id, &req.current_id, &req.new_id)
        .await?;

    rotated_session_response(&state, &identity, "USER_ID_UPDATED", "User ID updated", &user)
        .await
}

/// POST /update/pw
pub async fn update_password<U, S>(
    State(state): State<AuthAppState<U, S>>,
    identity: UserIdentity,
    AppJson(req): AppJson<UpdatePasswordRequest>,
) -> AuthResult<Response>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state
        .user_use_case()
        .update_user_password(&identity.user_id, req.now_password, req.change_password)
        .await?;

    rotated_session_response(&state, &identity, "PASSWORD_UPDATED", "Password updated", &user)
        .await
}

// ============================================================================
// Helpers
// ============================================================================

/// Replace the caller's session and answer with the new cookie
async fn rotated_session_response<U, S>(
    state: &AuthAppState<U, S>,
    identity: &UserIdentity,
    code: &'static str,
    message: &'static str,
    user: &User,
) -> AuthResult<Response>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = state
        .session_service()
        .replace(&identity.session_token, user.user_id)
        .await?;
    let cookie = session_cookie(&state.config, &token)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserEnvelope {
            code,
            message,
            user: UserResponse::from(user),
        }),
    )
        .into_response())
}
