/// Submitter identity
use crate::error::InvalidNameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of a submitting user
///
/// Always non-empty and trimmed. This is a convenience label, not an
/// authenticated principal: equality is case-sensitive and nothing stops two
/// people from picking the same name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Trim `raw` and reject it when nothing is left
    pub fn parse(raw: &str) -> Result<Self, InvalidNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidNameError);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
