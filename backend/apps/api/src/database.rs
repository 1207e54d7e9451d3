//! Database bring-up

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

/// Connect to Postgres, retrying with a fixed delay.
///
/// Returns the last connection error once `db_connect_attempts` is used up.
pub async fn connect_with_retry(config: &Config) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 1;
    loop {
        let result = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.database_url)
            .await;

        match result {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < config.db_connect_attempts => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts = config.db_connect_attempts,
                    "Database not reachable, retrying"
                );
                tokio::time::sleep(config.db_connect_backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
