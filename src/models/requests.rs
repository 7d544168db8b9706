//! Request envelope for the wire protocol
//!
//! Defines the structure of incoming requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Request envelope sent by clients.
///
/// # Fields
/// - `action`: One of `GET`, `SET`, `UPDATE`, `DELETE`
/// - `key`: The key to operate on
/// - `value`: New value; ignored for `GET` and `DELETE`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub action: String,
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Request {
    pub fn new(action: Action, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            action: action.to_string(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn get(key: impl Into<String>) -> Self {
        Self::new(Action::Get, key, "")
    }

    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Action::Set, key, value)
    }

    pub fn update(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Action::Update, key, value)
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::new(Action::Delete, key, "")
    }

    /// Parses the action field.
    pub fn parsed_action(&self) -> Result<Action, UnknownAction> {
        self.action.parse()
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

// == Action ==
/// Operations understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Set,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Get => "GET",
            Action::Set => "SET",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action string did not name a known operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    /// Action names are matched exactly; lower-case forms are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Action::Get),
            "SET" => Ok(Action::Set),
            "UPDATE" => Ok(Action::Update),
            "DELETE" => Ok(Action::Delete),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialize() {
        let json = r#"{"action": "SET", "key": "name", "value": "John"}"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert_eq!(req, Request::set("name", "John"));
    }

    #[test]
    fn test_request_value_defaults_to_empty() {
        let json = r#"{"action": "GET", "key": "name"}"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, "");
        assert_eq!(req.parsed_action(), Ok(Action::Get));
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("DELETE".parse::<Action>(), Ok(Action::Delete));
        assert_eq!("UPDATE".parse::<Action>(), Ok(Action::Update));
        assert_eq!(
            "get".parse::<Action>(),
            Err(UnknownAction("get".to_string()))
        );
        assert!("PATCH".parse::<Action>().is_err());
    }

    #[test]
    fn test_validate_empty_key() {
        assert!(Request::get("").validate().is_some());
        assert!(Request::get("name").validate().is_none());
    }
}
