//! Storage backend configuration.
//!
//! # Environment Variables
//!
//! - `STORAGE_BACKEND`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//! - `RUN_MIGRATIONS`: apply pending migrations at startup (default: true)

use anyhow::{Context, bail};
use std::env;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("unknown storage backend: {}", other),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StorageBackend::Postgres,
        };

        Ok(Self {
            backend,
            url: env::var("DATABASE_URL").ok(),
            max_connections: crate::env_or("DATABASE_MAX_CONNECTIONS", 5),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        })
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.url
            .as_deref()
            .context("DATABASE_URL must be set when STORAGE_BACKEND=postgres")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_backend() {
        assert_eq!(
            "postgres".parse::<StorageBackend>().unwrap(),
            StorageBackend::Postgres
        );
        assert_eq!(
            " Memory ".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
        assert!("mongo".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_missing_url_is_an_error() {
        let config = DatabaseConfig {
            backend: StorageBackend::Postgres,
            url: None,
            max_connections: 5,
            run_migrations: true,
        };
        assert!(config.database_url().is_err());
    }
}
