//! Session Service
//!
//! Token lifecycle on top of a [`SessionRepository`]. Cookies are handled
//! by the presentation layer.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{UserId, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};

pub struct SessionService<S>
where
    S: SessionRepository,
{
    sessions: Arc<S>,
}

impl<S> SessionService<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    /// Issue a new token for `user_id`.
    ///
    /// Other sessions of the same user stay valid.
    pub async fn create(&self, user_id: UserId) -> AuthResult<SessionToken> {
        let token = SessionToken::generate();
        self.sessions.create(&token, &user_id).await?;

        tracing::info!(user_id = %user_id, "Session created");

        Ok(token)
    }

    /// Resolve a token to its user, `SessionInvalid` if unknown
    pub async fn get(&self, token: &SessionToken) -> AuthResult<UserId> {
        self.sessions
            .find(token)
            .await?
            .ok_or(AuthError::SessionInvalid)
    }

    pub async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        self.sessions.delete(token).await?;
        tracing::info!("Session deleted");
        Ok(())
    }

    /// Drop `old` and issue a fresh token for `user_id`.
    ///
    /// Not atomic: a failure after the delete leaves the user logged out.
    pub async fn replace(&self, old: &SessionToken, user_id: UserId) -> AuthResult<SessionToken> {
        self.sessions.delete(old).await?;
        let token = SessionToken::generate();
        self.sessions.create(&token, &user_id).await?;

        tracing::info!(user_id = %user_id, "Session replaced");

        Ok(token)
    }
}
