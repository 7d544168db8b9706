//! Error types for the key-value server
//!
//! Provides unified error handling using thiserror. Per-key outcomes such as
//! a missing key are values (see [`crate::kv::Outcome`]), not errors.

use std::time::Duration;

use thiserror::Error;

// == Kv Error Enum ==
/// Unified error type for the key-value server.
#[derive(Error, Debug)]
pub enum KvError {
    /// Socket or filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Peer announced a frame larger than the protocol allows
    #[error("Frame too large: {0} bytes")]
    FrameTooLarge(usize),

    /// Peer stayed silent past the read deadline
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl KvError {
    /// Returns true if the error means the peer went away cleanly mid-frame.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, KvError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

// == Result Type Alias ==
/// Convenience Result type for the key-value server.
pub type Result<T> = std::result::Result<T, KvError>;
