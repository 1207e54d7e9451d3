//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{UserId, user_name::UserName, user_password::UserPassword};

/// Persisted user account
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned surrogate key
    pub user_id: UserId,
    /// Login handle (unique among live users)
    pub user_name: UserName,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; repositories never return rows where this is set
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// Input for account creation; the key and timestamps come from the database
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password_hash: UserPassword,
}
