//! Request and Response envelopes for the wire protocol
//!
//! These are the JSON payloads carried inside each length-prefixed frame.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{Action, Request, UnknownAction};
pub use responses::{Response, INVALID_KEY, UNKNOWN_ACTION, VALUE_TOO_LARGE};
