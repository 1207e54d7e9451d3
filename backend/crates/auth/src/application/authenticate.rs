//! Authenticate Use Case
//!
//! Verifies a user ID / password pair and looks users up by key.

use std::sync::Arc;

use platform::password::CredentialHasher;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct AuthUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<CredentialHasher>,
}

impl<U> AuthUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<CredentialHasher>) -> Self {
        Self { user_repo, hasher }
    }

    /// Unknown user, malformed input and wrong password all collapse into
    /// `InvalidCredentials` so the response does not reveal which one it was.
    pub async fn authenticate(&self, user_name: &str, password: String) -> AuthResult<User> {
        let user_name = UserName::new(user_name).map_err(|_| AuthError::InvalidCredentials)?;
        let password = RawPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = match self.user_repo.find_by_user_name(&user_name).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        user.password_hash.verify(&password, &self.hasher)?;

        let user = if user.password_hash.needs_rehash(&self.hasher) {
            let mut user = user;
            user.set_password(UserPassword::from_raw(&password, &self.hasher)?);
            let user = self.user_repo.update(&user).await?;
            tracing::info!(user_id = %user.user_id, "Rehashed stale password hash");
            user
        } else {
            user
        };

        tracing::info!(user_id = %user.user_id, "User authenticated");

        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: &UserId) -> AuthResult<User> {
        let user = self.user_repo.find_by_id(user_id).await?;
        tracing::debug!(user_id = %user.user_id, "User fetched");
        Ok(user)
    }
}
