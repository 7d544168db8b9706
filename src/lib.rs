//! KV Proxy - An in-memory key-value server
//!
//! Serves GET/SET/UPDATE/DELETE over a length-prefixed TCP protocol through a
//! read-through caching proxy, expires keys after a fixed TTL and writes
//! periodic snapshots to disk.

pub mod client;
pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod server;
pub mod tasks;

pub use client::KvClient;
pub use config::Config;
pub use error::{KvError, Result};
pub use kv::{CacheProxy, Outcome, Store};
pub use tasks::{spawn_snapshot_task, spawn_sweeper_task, shutdown_channel};
