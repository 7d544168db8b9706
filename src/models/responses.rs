//! Response envelope for the wire protocol
//!
//! Every request is answered with the same four-field envelope; which fields
//! carry meaning depends on the action.

use serde::{Deserialize, Serialize};

use crate::kv::Outcome;

/// Message sent when the action is not recognised.
pub const UNKNOWN_ACTION: &str = "UNKNOWN_ACTION";

/// Message sent when the request key is empty.
pub const INVALID_KEY: &str = "INVALID_KEY";

/// Message sent when a value would not fit in the response that reads it back.
pub const VALUE_TOO_LARGE: &str = "VALUE_TOO_LARGE";

/// Response envelope returned to clients.
///
/// | action | meaningful fields |
/// |---|---|
/// | GET | `value`, `found` |
/// | SET | `success` (always true) |
/// | UPDATE / DELETE | `success`, `message` |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub success: bool,
}

impl Response {
    /// Result of a GET; an absent key yields an empty value.
    pub fn get(value: Option<String>) -> Self {
        Self {
            found: value.is_some(),
            value: value.unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Result of a SET.
    pub fn set(success: bool) -> Self {
        Self {
            success,
            ..Self::default()
        }
    }

    /// Result of an UPDATE or DELETE.
    pub fn outcome(outcome: Outcome) -> Self {
        Self {
            message: outcome.as_str().to_string(),
            success: outcome.succeeded(),
            ..Self::default()
        }
    }

    /// Failure reply carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}
