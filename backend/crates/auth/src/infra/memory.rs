//! In-Memory Session Store
//!
//! Process-local map, used when no cache is configured and in tests.
//! Sessions do not survive a restart and are not shared between replicas.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{UserId, session_token::SessionToken};
use crate::error::AuthResult;

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, UserId>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionStore {
    async fn create(&self, token: &SessionToken, user_id: &UserId) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(token.storage_key(), *user_id);
        Ok(())
    }

    async fn find(&self, token: &SessionToken) -> AuthResult<Option<UserId>> {
        Ok(self.sessions.read().await.get(&token.storage_key()).copied())
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        self.sessions.write().await.remove(&token.storage_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_find_delete() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::generate();
        let user_id = UserId::new(7);

        assert_eq!(store.find(&token).await.unwrap(), None);
        store.create(&token, &user_id).await.unwrap();
        assert_eq!(store.find(&token).await.unwrap(), Some(user_id));

        store.delete(&token).await.unwrap();
        assert_eq!(store.find(&token).await.unwrap(), None);
        // Deleting twice is fine
        store.delete(&token).await.unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemorySessionStore::new();
        let other = store.clone();
        let token = SessionToken::generate();

        store.create(&token, &UserId::new(1)).await.unwrap();
        assert_eq!(other.find(&token).await.unwrap(), Some(UserId::new(1)));
    }
}
