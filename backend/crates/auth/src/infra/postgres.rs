//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A unique-index hit on `users.user_name` is a taken name, not a storage fault
fn map_write_error(err: sqlx::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::UserNameTaken
    } else {
        AuthError::Database(err)
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_name, password_hash)
            VALUES ($1, $2)
            RETURNING user_id, user_name, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(user.user_name.as_str())
        .bind(user.password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE user_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE user_name = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn update(&self, user: &User) -> AuthResult<User> {
        self.update_password(&user.user_id, &user.password_hash)
            .await
    }

    async fn update_user_name(
        &self,
        user_id: &UserId,
        current: &UserName,
        new: &UserName,
    ) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<String> = sqlx::query_scalar(
            r#"
            SELECT user_name FROM users
            WHERE user_id = $1 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        let locked = locked.ok_or(AuthError::UserNotFound)?;
        if locked != current.as_str() {
            return Err(AuthError::IdentityMismatch);
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET user_name = $2, updated_at = now()
            WHERE user_id = $1
            RETURNING user_id, user_name, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(user_id.value())
        .bind(new.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        row.into_user()
    }

    async fn update_password(
        &self,
        user_id: &UserId,
        password: &UserPassword,
    ) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT user_id FROM users
            WHERE user_id = $1 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = now()
            WHERE user_id = $1
            RETURNING user_id, user_name, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(user_id.value())
        .bind(password.as_phc_string())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_user()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::new(self.user_id),
            user_name: UserName::from_db(self.user_name),
            password_hash: UserPassword::from_phc(self.password_hash)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
