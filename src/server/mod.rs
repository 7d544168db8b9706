//! Server Module
//!
//! TCP front end for the caching proxy.
//!
//! # Protocol
//! Length-prefixed JSON frames. A client sends a request envelope
//! `{action, key, value}` and receives `{value, message, found, success}`.
//! A connection may carry any number of request/response pairs.

pub mod codec;
pub mod handler;
pub mod listener;

pub use handler::{dispatch, handle_connection};
pub use listener::serve;
