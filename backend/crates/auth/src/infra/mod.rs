//! Infrastructure Layer
//!
//! Database and session-cache implementations.

pub mod memory;
pub mod postgres;
pub mod redis;
pub mod session_backend;

pub use memory::InMemorySessionStore;
pub use postgres::PgUserRepository;
pub use self::redis::RedisSessionStore;
pub use session_backend::SessionBackend;
