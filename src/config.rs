use crate::errors::ServerError;
use std::env;
use std::net::SocketAddr;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub schema_path: String,
    pub addr: SocketAddr,
    pub workers: usize,
    /// Locale used for dates when the request carries none.
    pub default_lang: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ServerError> {
        let db_path = env_or("FLEET_DB_PATH", "fleet.sqlite3");
        let schema_path = env_or("FLEET_SCHEMA_PATH", "sql/schema.sql");

        let addr_raw = env_or("FLEET_ADDR", "127.0.0.1:3000");
        let addr = addr_raw
            .parse()
            .map_err(|e| ServerError::BadRequest(format!("FLEET_ADDR '{addr_raw}': {e}")))?;

        let workers_raw = env_or("FLEET_WORKERS", "8");
        let workers = workers_raw
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ServerError::BadRequest(format!("FLEET_WORKERS must be a positive number, got '{workers_raw}'"))
            })?;

        let default_lang = env_or("FLEET_DEFAULT_LANG", "en_US");

        Ok(Self {
            db_path,
            schema_path,
            addr,
            workers,
            default_lang,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
