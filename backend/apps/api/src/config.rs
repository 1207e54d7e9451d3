//! Process configuration
//!
//! Read once from the environment at startup. Every problem is a
//! [`ConfigError`]; nothing here panics.

use std::str::FromStr;
use std::time::Duration;

use auth::AuthConfig;
use auth::application::config::SameSite;
use thiserror::Error;

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://server-app:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name}={value:?} is invalid: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_connect_attempts: u32,
    pub db_connect_backoff: Duration,
    /// `None` selects the in-memory session store
    pub redis_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub port: u16,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_connect_attempts = parse_or(&var, "DB_CONNECT_ATTEMPTS", 5u32)?;
        if db_connect_attempts == 0 {
            return Err(invalid("DB_CONNECT_ATTEMPTS", "0", "must be at least 1"));
        }

        let cookie_same_site = match var("COOKIE_SAME_SITE") {
            Some(raw) => SameSite::parse(&raw)
                .ok_or_else(|| invalid("COOKIE_SAME_SITE", &raw, "expected strict, lax or none"))?,
            None => SameSite::Lax,
        };

        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            session_cookie_name: var("SESSION_COOKIE_NAME").unwrap_or(defaults.session_cookie_name),
            cookie_secure: parse_bool(&var, "COOKIE_SECURE", defaults.cookie_secure)?,
            cookie_http_only: parse_bool(&var, "COOKIE_HTTP_ONLY", defaults.cookie_http_only)?,
            cookie_same_site,
            cookie_domain: var("COOKIE_DOMAIN"),
            session_ttl: var("SESSION_TTL_SECS")
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .map(Duration::from_secs)
                        .ok_or_else(|| invalid("SESSION_TTL_SECS", &raw, "expected a positive integer"))
                })
                .transpose()?,
            session_key_prefix: var("SESSION_KEY_PREFIX").unwrap_or(defaults.session_key_prefix),
            password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            db_max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 5u32)?,
            db_connect_attempts,
            db_connect_backoff: Duration::from_secs(parse_or(&var, "DB_CONNECT_BACKOFF_SECS", 2u64)?),
            redis_url: var("REDIS_URL"),
            frontend_origins,
            port: parse_or(&var, "PORT", 8080u16)?,
            auth,
        })
    }
}

fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(name, &raw, e.to_string())),
        None => Ok(default),
    }
}

fn parse_bool<F>(var: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(name, &raw, "expected true or false")),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/blog")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_connect_attempts, 5);
        assert_eq!(config.db_connect_backoff, Duration::from_secs(2));
        assert!(config.redis_url.is_none());
        assert_eq!(
            config.frontend_origins,
            vec!["http://localhost:3000", "http://server-app:3000"]
        );
        assert_eq!(config.auth.session_cookie_name, "session_id");
        assert!(config.auth.cookie_secure);
        assert!(config.auth.cookie_http_only);
        assert_eq!(config.auth.cookie_same_site, SameSite::Lax);
        assert!(config.auth.session_ttl.is_none());
        assert!(config.auth.password_pepper.is_none());
    }

    #[test]
    fn test_database_url_is_required() {
        assert!(matches!(
            load(&[]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
        assert!(matches!(
            load(&[("DATABASE_URL", "  ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/blog"),
            ("REDIS_URL", "redis://cache:6379"),
            ("PORT", "9000"),
            ("SESSION_TTL_SECS", "3600"),
            ("COOKIE_SECURE", "false"),
            ("COOKIE_SAME_SITE", "Strict"),
            ("COOKIE_DOMAIN", "example.com"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
            ("PASSWORD_PEPPER", "pepper"),
        ])
        .unwrap();

        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.auth.session_ttl, Some(Duration::from_secs(3600)));
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.cookie_same_site, SameSite::Strict);
        assert_eq!(config.auth.cookie_domain.as_deref(), Some("example.com"));
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.auth.password_pepper.as_deref(), Some(b"pepper".as_slice()));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        for (name, value) in [
            ("PORT", "http"),
            ("COOKIE_SECURE", "maybe"),
            ("COOKIE_SAME_SITE", "sometimes"),
            ("SESSION_TTL_SECS", "0"),
            ("DB_CONNECT_ATTEMPTS", "0"),
        ] {
            let result = load(&[("DATABASE_URL", "postgres://db/blog"), (name, value)]);
            assert!(
                matches!(result, Err(ConfigError::Invalid { .. })),
                "{name}={value}"
            );
        }
    }
}
