//! Server configuration.

use std::env;
use std::path::PathBuf;

use todo_store::StoreConfig;

/// Database file used when nothing else is configured.
const DEFAULT_DATABASE_FILE: &str = "todo.db";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Storage backend settings.
    pub store: StoreConfig,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Serverless hosts only allow writes under the temp dir
        let sqlite_path = match lookup("TODO_DATABASE_PATH").filter(|p| !p.is_empty()) {
            Some(path) => PathBuf::from(path),
            None if lookup("VERCEL").is_some_and(|v| !v.is_empty()) => {
                env::temp_dir().join(DEFAULT_DATABASE_FILE)
            }
            None => PathBuf::from(DEFAULT_DATABASE_FILE),
        };

        let port = match lookup("TODO_SERVER_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("TODO_SERVER_PORT is not a valid port: {raw}"))?,
            None => 5000,
        };

        Ok(Self {
            host: lookup("TODO_SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            store: StoreConfig {
                remote_url: lookup("SUPABASE_URL"),
                remote_key: lookup("SUPABASE_KEY"),
                sqlite_path,
            },
            log_level: lookup("TODO_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
