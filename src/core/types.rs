//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a learner session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Feedback state of the current task
///
/// Reset to `Idle` whenever the learner's position changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Error,
    Success,
}

impl Status {
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

/// Named cable clamp in the disconnect interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    Negative,
    Positive,
}

impl HandleId {
    pub const ALL: [HandleId; 2] = [HandleId::Negative, HandleId::Positive];

    /// Slot in fixed-size per-handle arrays
    pub fn index(self) -> usize {
        match self {
            HandleId::Negative => 0,
            HandleId::Positive => 1,
        }
    }

    /// Identifier used as a click target in content
    pub fn as_str(self) -> &'static str {
        match self {
            HandleId::Negative => "negative",
            HandleId::Positive => "positive",
        }
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "negative" => Ok(HandleId::Negative),
            "positive" => Ok(HandleId::Positive),
            other => Err(format!("unknown handle '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_id_round_trips_through_target_string() {
        for handle in HandleId::ALL {
            assert_eq!(handle.as_str().parse::<HandleId>(), Ok(handle));
        }
        assert!("Negative".parse::<HandleId>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
