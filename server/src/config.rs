//! Environment-driven server configuration.
//!
//! | variable        | default     |
//! |-----------------|-------------|
//! | `TODO_BIND`     | `127.0.0.1` |
//! | `PORT`          | `3000`      |
//! | `TODO_STORE`    | `memory`    |
//! | `TODO_DB_PATH`  | `todos.db`  |
//! | `TODO_SEED`     | `false`     |
//! | `TODO_LOG_JSON` | `false`     |
//!
//! Unset variables take their default. Set-but-invalid values are errors.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use crate::store::{MemoryTodoStore, SqliteTodoStore, StoreResult, TodoStore};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "todos.db";
pub const IN_MEMORY_DB_PATH: &str = ":memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub name: String,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}=`{}`; expected {}",
            self.name, self.value, self.expected
        )
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub db_path: PathBuf,
    pub seed: bool,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            store: StoreKind::Memory,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            seed: false,
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("TODO_BIND").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host.trim().parse().map_err(|_| ConfigError {
            name: "TODO_BIND".to_string(),
            value: host.clone(),
            expected: "an IP address",
        })?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError {
                name: "PORT".to_string(),
                value: raw.clone(),
                expected: "a port number",
            })?,
            None => DEFAULT_PORT,
        };

        let store = match lookup("TODO_STORE") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "memory" => StoreKind::Memory,
                "sqlite" => StoreKind::Sqlite,
                _ => {
                    return Err(ConfigError {
                        name: "TODO_STORE".to_string(),
                        value: raw,
                        expected: "memory|sqlite",
                    })
                }
            },
            None => StoreKind::Memory,
        };

        let db_path = lookup("TODO_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            store,
            db_path,
            seed: parse_bool(&lookup, "TODO_SEED", false)?,
            log_json: parse_bool(&lookup, "TODO_LOG_JSON", false)?,
        })
    }

    /// Opens the configured storage engine.
    pub fn open_store(&self) -> StoreResult<Arc<dyn TodoStore>> {
        match self.store {
            StoreKind::Memory => Ok(Arc::new(MemoryTodoStore::new())),
            StoreKind::Sqlite if self.db_path.as_os_str() == IN_MEMORY_DB_PATH => {
                Ok(Arc::new(SqliteTodoStore::open_in_memory()?))
            }
            StoreKind::Sqlite => Ok(Arc::new(SqliteTodoStore::open(&self.db_path)?)),
        }
    }
}

fn parse_bool<F>(lookup: &F, name: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        _ => Err(ConfigError {
            name: name.to_string(),
            value: raw,
            expected: "true|false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(from_pairs(&[]).unwrap(), ServerConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = from_pairs(&[
            ("TODO_BIND", "0.0.0.0"),
            ("PORT", "8080"),
            ("TODO_STORE", "SQLite"),
            ("TODO_DB_PATH", "/tmp/t.db"),
            ("TODO_SEED", "yes"),
            ("TODO_LOG_JSON", "1"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.store, StoreKind::Sqlite);
        assert_eq!(config.db_path, PathBuf::from("/tmp/t.db"));
        assert!(config.seed);
        assert!(config.log_json);
    }

    #[test]
    fn rejects_bad_port() {
        let err = from_pairs(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.name, "PORT");
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn rejects_unknown_store() {
        let err = from_pairs(&[("TODO_STORE", "postgres")]).unwrap_err();
        assert_eq!(err.expected, "memory|sqlite");
    }

    #[test]
    fn rejects_bad_bool() {
        let err = from_pairs(&[("TODO_SEED", "maybe")]).unwrap_err();
        assert_eq!(err.name, "TODO_SEED");
    }

    #[tokio::test]
    async fn sqlite_memory_path_opens_private_database() {
        let config = from_pairs(&[("TODO_STORE", "sqlite"), ("TODO_DB_PATH", ":memory:")]).unwrap();
        let store = config.open_store().unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
