//! Centralized configuration (environment variables + defaults).
//!
//! Variables may also come from a `.env` file; call [`Config::from_env`] after
//! `dotenv::dotenv()`.

use anyhow::{anyhow, Context};
use std::env;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9191";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which storage backend serves the todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "mem" => Ok(Backend::Memory),
            "postgres" | "postgresql" | "pg" => Ok(Backend::Postgres),
            other => Err(anyhow!(
                "TODO_BACKEND must be `memory` or `postgres` (got `{}`)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    /// Required for the postgres backend. Never hard-coded.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source (used by tests).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("TODO_BACKEND") {
            Some(v) => v.parse()?,
            None => Backend::default(),
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if backend == Backend::Postgres && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set when TODO_BACKEND=postgres"));
        }

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a valid u32 (got `{}`)", v))?
                .max(1),
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            backend,
            database_url,
            max_connections,
            bind_addr,
        })
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_to_memory_backend() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.backend, Backend::Memory);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn postgres_requires_database_url() {
        assert!(config(&[("TODO_BACKEND", "postgres")]).is_err());
        assert!(config(&[("TODO_BACKEND", "postgres"), ("DATABASE_URL", " ")]).is_err());

        let cfg = config(&[
            ("TODO_BACKEND", "Postgres"),
            ("DATABASE_URL", "postgres://u:p@localhost/todos"),
            ("DB_MAX_CONNECTIONS", "0"),
        ])
        .unwrap();
        assert_eq!(cfg.backend, Backend::Postgres);
        assert_eq!(cfg.database_url().unwrap(), "postgres://u:p@localhost/todos");
        assert_eq!(cfg.max_connections, 1);
    }

    #[test]
    fn rejects_unknown_backend_and_bad_numbers() {
        assert!(config(&[("TODO_BACKEND", "mongo")]).is_err());
        assert!(config(&[("DB_MAX_CONNECTIONS", "lots")]).is_err());
    }
}
