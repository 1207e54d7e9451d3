//! Redis Session Store
//!
//! Keys are `{prefix}{sha256(token)}` and values are the decimal user ID.
//! Without a TTL a key lives until logout or replacement.

use std::sync::Arc;
use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{UserId, session_token::SessionToken};
use crate::error::AuthResult;

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    key_prefix: Arc<str>,
    ttl: Option<Duration>,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, key_prefix: impl Into<String>, ttl: Option<Duration>) -> Self {
        Self {
            conn,
            key_prefix: Arc::from(key_prefix.into()),
            ttl,
        }
    }

    /// Open a client and a reconnecting connection manager
    pub async fn connect(
        url: &str,
        key_prefix: impl Into<String>,
        ttl: Option<Duration>,
    ) -> AuthResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self::new(conn, key_prefix, ttl))
    }

    fn key(&self, token: &SessionToken) -> String {
        format!("{}{}", self.key_prefix, token.storage_key())
    }
}

impl SessionRepository for RedisSessionStore {
    async fn create(&self, token: &SessionToken, user_id: &UserId) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let key = self.key(token);

        match self.ttl {
            Some(ttl) => {
                conn.set_ex::<_, _, ()>(key, user_id.value(), ttl.as_secs().max(1))
                    .await?
            }
            None => conn.set::<_, _, ()>(key, user_id.value()).await?,
        }

        Ok(())
    }

    async fn find(&self, token: &SessionToken) -> AuthResult<Option<UserId>> {
        let mut conn = self.conn.clone();
        let value: Option<i64> = conn.get(self.key(token)).await?;
        Ok(value.map(UserId::new))
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(token)).await?;
        Ok(())
    }
}
