//! User Use Case
//!
//! Account creation, user ID change and password change.
//! Session rotation after a change is the caller's job (see `SessionService::replace`).

use std::sync::Arc;

use platform::password::CredentialHasher;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct UserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<CredentialHasher>,
}

impl<U> UserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<CredentialHasher>) -> Self {
        Self { user_repo, hasher }
    }

    /// Validate, hash and persist a new account.
    ///
    /// Both fields are validated before the repository is touched.
    pub async fn create_user(&self, user_name: &str, password: String) -> AuthResult<User> {
        let user_name = UserName::new(user_name)?;
        let password = RawPassword::new(password)?;
        let password_hash = UserPassword::from_raw(&password, &self.hasher)?;

        let user = self
            .user_repo
            .create(&NewUser {
                user_name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.user_id, user_name = %user.user_name, "User registered");

        Ok(user)
    }

    /// Rename the signed-in user.
    ///
    /// `current` must be the session user's present name, otherwise
    /// `IdentityMismatch`. The repository repeats the check under the row lock.
    pub async fn update_user_name(
        &self,
        user_id: &UserId,
        current: &str,
        new: &str,
    ) -> AuthResult<User> {
        let current = UserName::new(current)?;
        let new = UserName::new(new)?;

        if current == new {
            let user = self.user_repo.find_by_id(user_id).await?;
            if user.user_name != current {
                return Err(AuthError::IdentityMismatch);
            }
            return Ok(user);
        }

        let user = self
            .user_repo
            .update_user_name(user_id, &current, &new)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            old_user_name = %current,
            new_user_name = %user.user_name,
            "User ID changed"
        );

        Ok(user)
    }

    /// Change the password after re-verifying the current one.
    ///
    /// A wrong `current` is `InvalidCredentials` and nothing is written.
    pub async fn update_user_password(
        &self,
        user_id: &UserId,
        current: String,
        new: String,
    ) -> AuthResult<User> {
        let new = RawPassword::new(new)?;
        let current = RawPassword::new(current).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.user_repo.find_by_id(user_id).await?;
        user.password_hash.verify(&current, &self.hasher)?;

        let password_hash = UserPassword::from_raw(&new, &self.hasher)?;
        let user = self
            .user_repo
            .update_password(&user.user_id, &password_hash)
            .await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(user)
    }
}
