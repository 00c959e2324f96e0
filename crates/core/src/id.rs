//! Unique identifiers for Conflux entities.
//!
//! A single strongly-typed UUID wrapper is used for the three execution
//! identifiers carried by [`ExecutionContext`](crate::ExecutionContext)
//! (workflow, task and action execution). The wrapper is `Copy`
//! (16 bytes, stack-allocated) and supports:
//!
//! - `new()` for random UUID generation
//! - `nil()` for the zero-valued default
//! - `parse(&str)` for string parsing
//! - Full serde support (serializes as a UUID string)
//! - `Display`, `FromStr`, `Eq`, `Ord`, `Hash`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one execution unit (workflow, task or action execution).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExecutionId(Uuid);

impl ExecutionId {
    /// Generate a random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The zero-valued identifier.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Parse an identifier from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    /// Returns `true` if this is the zero-valued identifier.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ExecutionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for ExecutionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_non_nil_id() {
        let id = ExecutionId::new();
        assert!(!id.is_nil());
    }

    #[test]
    fn nil_creates_zero_valued_id() {
        let id = ExecutionId::nil();
        assert!(id.is_nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn parse_valid_uuid_string_succeeds() {
        let id = ExecutionId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(!id.is_nil());
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn parse_invalid_string_returns_error() {
        assert!(ExecutionId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn serde_round_trip_as_string() {
        let id = ExecutionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with('"'));
        let back: ExecutionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn from_str_round_trip() {
        let id = ExecutionId::new();
        let parsed: ExecutionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
