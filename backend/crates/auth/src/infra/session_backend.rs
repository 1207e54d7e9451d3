//! Session backend selected at startup

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{UserId, session_token::SessionToken};
use crate::error::AuthResult;
use crate::infra::{memory::InMemorySessionStore, redis::RedisSessionStore};

#[derive(Clone)]
pub enum SessionBackend {
    Redis(RedisSessionStore),
    Memory(InMemorySessionStore),
}

impl SessionBackend {
    pub fn name(&self) -> &'static str {
        match self {
            SessionBackend::Redis(_) => "redis",
            SessionBackend::Memory(_) => "memory",
        }
    }
}

impl SessionRepository for SessionBackend {
    async fn create(&self, token: &SessionToken, user_id: &UserId) -> AuthResult<()> {
        match self {
            SessionBackend::Redis(store) => store.create(token, user_id).await,
            SessionBackend::Memory(store) => store.create(token, user_id).await,
        }
    }

    async fn find(&self, token: &SessionToken) -> AuthResult<Option<UserId>> {
        match self {
            SessionBackend::Redis(store) => store.find(token).await,
            SessionBackend::Memory(store) => store.find(token).await,
        }
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        match self {
            SessionBackend::Redis(store) => store.delete(token).await,
            SessionBackend::Memory(store) => store.delete(token).await,
        }
    }
}

impl From<RedisSessionStore> for SessionBackend {
    fn from(store: RedisSessionStore) -> Self {
        SessionBackend::Redis(store)
    }
}

impl From<InMemorySessionStore> for SessionBackend {
    fn from(store: InMemorySessionStore) -> Self {
        SessionBackend::Memory(store)
    }
}
