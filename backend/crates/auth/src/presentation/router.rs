//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the Auth router for any repository / session store pair
///
/// `/regist` and `/login` are public; everything else sits behind the
/// session gate.
pub fn auth_router<U, S>(state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/logout", post(handlers::logout::<U, S>))
        .route("/api/login-id", get(handlers::login_id::<U, S>))
        .route("/update/id", post(handlers::update_user_id::<U, S>))
        .route("/update/pw", post(handlers::update_password::<U, S>))
        .route_layer(from_fn_with_state(
            state.session_gate(),
            require_session::<S>,
        ));

    Router::new()
        .route("/regist", post(handlers::register::<U, S>))
        .route(
            "/login",
            get(handlers::login_status::<U, S>).post(handlers::login::<U, S>),
        )
        .merge(protected)
        .with_state(state)
}
