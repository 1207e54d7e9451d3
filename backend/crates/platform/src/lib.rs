//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the domain crates:
//! - Cryptographic utilities (random bytes, SHA-256, URL-safe Base64)
//! - Credential hashing (Argon2id with optional pepper)
//! - Cookie building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
