//! # Id Assignment
//!
//! The actor hands out ids for new entities according to an [`IdPolicy`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a [`ResourceActor`](crate::ResourceActor) chooses the id of a newly created entity.
///
/// * `CollectionLength` – `len + 1`, where `len` counts every stored entity including
///   soft-deleted ones. After a reset the length drops back to the seed size, so ids
///   issued before the reset are handed out again.
/// * `Monotonic` – a counter that only grows. It starts after the seed set and is not
///   rewound by a reset, so no id is ever issued twice by `create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    #[default]
    CollectionLength,
    Monotonic,
}

impl IdPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPolicy::CollectionLength => "collection_length",
            IdPolicy::Monotonic => "monotonic",
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown id policy `{0}` (expected `collection_length` or `monotonic`)")]
pub struct ParseIdPolicyError(pub String);

impl FromStr for IdPolicy {
    type Err = ParseIdPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "collection_length" | "length" => Ok(IdPolicy::CollectionLength),
            "monotonic" => Ok(IdPolicy::Monotonic),
            _ => Err(ParseIdPolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("monotonic".parse::<IdPolicy>(), Ok(IdPolicy::Monotonic));
        assert_eq!(
            "collection-length".parse::<IdPolicy>(),
            Ok(IdPolicy::CollectionLength)
        );
        assert_eq!("LENGTH".parse::<IdPolicy>(), Ok(IdPolicy::CollectionLength));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "uuid".parse::<IdPolicy>().unwrap_err();
        assert_eq!(err, ParseIdPolicyError("uuid".into()));
    }

    #[test]
    fn default_reproduces_length_plus_one() {
        assert_eq!(IdPolicy::default(), IdPolicy::CollectionLength);
        assert_eq!(IdPolicy::default().to_string(), "collection_length");
    }
}
