//! Resource identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Identifier of a user, project, post or comment.
///
/// The API issues numeric ids from some backends and string ids (for
/// example MongoDB object ids) from others, so both are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl ResourceId {
    /// Parse an id given on the command line or in a path.
    ///
    /// Purely numeric input becomes [`ResourceId::Number`]. Anything else must
    /// be a single non-empty path segment.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Self::Number(n));
        }
        if s.is_empty() {
            return Err(InvalidInputError::Id {
                value: s.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidInputError::Id {
                value: s.to_string(),
                reason: "may only contain letters, digits, '-' and '_'".to_string(),
            }
            .into());
        }
        Ok(Self::Text(s.to_string()))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// Error reported when an entity carries neither `id` nor `_id`.
pub(crate) const MISSING_ID: &str = "missing field `id`";

/// The identifier keys an entity may arrive with.
///
/// Backends send `id`, Mongo-style `_id`, or both at once when virtuals are
/// serialized. Flatten this into a wire struct instead of aliasing the keys,
/// which fails on the duplicate.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct IdFields {
    #[serde(default)]
    id: Option<ResourceId>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<ResourceId>,
}

impl IdFields {
    /// `id` wins when both keys are present.
    pub(crate) fn resolve(self) -> Option<ResourceId> {
        self.id.or(self.mongo_id)
    }

    pub(crate) fn require(self) -> Result<ResourceId, &'static str> {
        self.resolve().ok_or(MISSING_ID)
    }
}
