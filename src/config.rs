//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the listener binds to
    pub server_host: String,
    /// TCP server port
    pub server_port: u16,
    /// Age in seconds after which an unmodified key expires
    pub key_ttl: u64,
    /// Expiration sweep interval in seconds
    pub sweep_interval: u64,
    /// Snapshot interval in seconds
    pub snapshot_interval: u64,
    /// Destination file for snapshots
    pub snapshot_path: PathBuf,
    /// Per-frame read deadline for client connections, in seconds
    pub read_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST` - Bind address (default: 0.0.0.0)
    /// - `SERVER_PORT` - TCP server port (default: 8081)
    /// - `KEY_TTL` - Key time-to-live in seconds (default: 15)
    /// - `SWEEP_INTERVAL` - Expiration sweep frequency in seconds (default: 2)
    /// - `SNAPSHOT_INTERVAL` - Snapshot frequency in seconds (default: 5)
    /// - `SNAPSHOT_PATH` - Snapshot file (default: backup.json)
    /// - `READ_TIMEOUT` - Client read deadline in seconds (default: 10)
    ///
    /// Unparseable values fall back to the default. So does zero for the
    /// intervals and the read timeout, which would otherwise busy-loop.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            key_ttl: parse_var("KEY_TTL").unwrap_or(defaults.key_ttl),
            sweep_interval: positive_secs(env::var("SWEEP_INTERVAL").ok())
                .unwrap_or(defaults.sweep_interval),
            snapshot_interval: positive_secs(env::var("SNAPSHOT_INTERVAL").ok())
                .unwrap_or(defaults.snapshot_interval),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            read_timeout: positive_secs(env::var("READ_TIMEOUT").ok())
                .unwrap_or(defaults.read_timeout),
        }
    }

    /// Returns the `host:port` string the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.key_ttl)
    }

    pub fn sweep_every(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn snapshot_every(&self) -> Duration {
        Duration::from_secs(self.snapshot_interval)
    }

    pub fn read_deadline(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// A whole number of seconds greater than zero.
fn positive_secs(raw: Option<String>) -> Option<u64> {
    raw.and_then(|v| v.parse().ok()).filter(|&secs| secs > 0)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8081,
            key_ttl: 15,
            sweep_interval: 2,
            snapshot_interval: 5,
            snapshot_path: PathBuf::from("backup.json"),
            read_timeout: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 8081);
        assert_eq!(config.key_ttl, 15);
        assert_eq!(config.sweep_interval, 2);
        assert_eq!(config.snapshot_interval, 5);
        assert_eq!(config.snapshot_path, PathBuf::from("backup.json"));
        assert_eq!(config.read_timeout, 10);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "SERVER_HOST",
            "SERVER_PORT",
            "KEY_TTL",
            "SWEEP_INTERVAL",
            "SNAPSHOT_INTERVAL",
            "SNAPSHOT_PATH",
            "READ_TIMEOUT",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.bind_addr(), "0.0.0.0:8081");
        assert_eq!(config.ttl(), Duration::from_secs(15));
        assert_eq!(config.sweep_every(), Duration::from_secs(2));
        assert_eq!(config.snapshot_every(), Duration::from_secs(5));
        assert_eq!(config.read_deadline(), Duration::from_secs(10));
    }

    #[test]
    fn test_positive_secs_rejects_zero_and_garbage() {
        assert_eq!(positive_secs(Some("3".to_string())), Some(3));
        assert_eq!(positive_secs(Some("0".to_string())), None);
        assert_eq!(positive_secs(Some("-1".to_string())), None);
        assert_eq!(positive_secs(Some("soon".to_string())), None);
        assert_eq!(positive_secs(None), None);
    }
}
