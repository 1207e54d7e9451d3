//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{
    UserId, session_token::SessionToken, user_name::UserName, user_password::UserPassword,
};
use crate::error::AuthResult;

/// User repository trait
///
/// Lookups only see live rows (`deleted_at IS NULL`) and fail with
/// `AuthError::UserNotFound` on a miss.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user whose password is already hashed.
    /// A duplicate user name is `AuthError::UserNameTaken`.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<User>;

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<User>;

    /// Overwrite the stored password hash of an existing user
    async fn update(&self, user: &User) -> AuthResult<User>;

    /// Rename a user in one transaction.
    ///
    /// The row is locked by `user_id`; if its name is no longer `current`
    /// the call fails with `AuthError::IdentityMismatch` and nothing is written.
    async fn update_user_name(
        &self,
        user_id: &UserId,
        current: &UserName,
        new: &UserName,
    ) -> AuthResult<User>;

    /// Replace the password hash in one transaction
    async fn update_password(&self, user_id: &UserId, password: &UserPassword)
    -> AuthResult<User>;
}

/// Session store trait
///
/// Maps an opaque token to a user. Knows nothing about cookies.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create(&self, token: &SessionToken, user_id: &UserId) -> AuthResult<()>;

    async fn find(&self, token: &SessionToken) -> AuthResult<Option<UserId>>;

    /// Deleting an unknown token is not an error
    async fn delete(&self, token: &SessionToken) -> AuthResult<()>;
}
