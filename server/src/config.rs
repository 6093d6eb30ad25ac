//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::persistence::DEFAULT_FLUSH_INTERVAL_MS;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// JSON snapshot file. `None` keeps the store in memory only.
    pub snapshot_path: Option<PathBuf>,
    pub flush_interval_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, snapshot_path: None, flush_interval_ms: DEFAULT_FLUSH_INTERVAL_MS }
    }
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// - `PORT`: listen port (default 3000)
    /// - `PIXEL_STORE_PATH`: snapshot file (default: none)
    /// - `FLUSH_INTERVAL_MS`: snapshot flush period (default 500)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            snapshot_path: std::env::var("PIXEL_STORE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            flush_interval_ms: env_parse("FLUSH_INTERVAL_MS", DEFAULT_FLUSH_INTERVAL_MS),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset
/// or malformed.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
