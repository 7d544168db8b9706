//! Client Module
//!
//! Async client for the key-value server. Opens a fresh connection per
//! request.

use std::io;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::{KvError, Result};
use crate::models::{Request, Response};
use crate::server::codec::{read_message, write_message};

/// Client for a running key-value server.
#[derive(Debug, Clone)]
pub struct KvClient {
    addr: String,
    timeout: Duration,
}

impl KvClient {
    /// Creates a client for the server at `addr` (`host:port`).
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Sets the deadline for a whole request/response exchange.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends one request on a new connection and waits for the response.
    pub async fn send(&self, request: &Request) -> Result<Response> {
        match timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => Err(KvError::Timeout(self.timeout)),
        }
    }

    async fn exchange(&self, request: &Request) -> Result<Response> {
        let mut stream = TcpStream::connect(&self.addr).await?;
        write_message(&mut stream, request).await?;
        read_message(&mut stream).await?.ok_or_else(|| {
            KvError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "server closed the connection without responding",
            ))
        })
    }

    /// Returns the value for `key`, or None if the server does not have it.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let resp = self.send(&Request::get(key)).await?;
        Ok(resp.found.then_some(resp.value))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<bool> {
        Ok(self.send(&Request::set(key, value)).await?.success)
    }

    /// Returns the outcome message (`UPDATED` / `NOT_FOUND`) and whether the
    /// update was applied.
    pub async fn update(&self, key: &str, value: &str) -> Result<(String, bool)> {
        let resp = self.send(&Request::update(key, value)).await?;
        Ok((resp.message, resp.success))
    }

    /// Returns the outcome message (`DELETED` / `NOT_FOUND`) and whether the
    /// key was removed.
    pub async fn delete(&self, key: &str) -> Result<(String, bool)> {
        let resp = self.send(&Request::delete(key)).await?;
        Ok((resp.message, resp.success))
    }
}
