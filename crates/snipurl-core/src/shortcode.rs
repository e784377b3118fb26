use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a candidate code falls outside the URL-safe class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("short codes may contain only ASCII letters, digits, '-' and '_'")]
pub struct InvalidCode;

/// A validated short code: one or more characters from `[A-Za-z0-9_-]`.
///
/// Caller-chosen aliases and generated codes share this character class, so
/// a path segment that fails to parse can never name a stored record.
/// Deserialization goes through the same validation, so a stored document
/// cannot smuggle an out-of-class code into a typed record; on the wire the
/// code stays a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a `ShortCode` after validating the character class.
    pub fn parse(code: impl Into<String>) -> Result<Self, InvalidCode> {
        let code = code.into();
        if code.is_empty() {
            return Err(InvalidCode);
        }
        if !code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidCode);
        }
        Ok(Self(code))
    }

    /// Wraps a code produced by a trusted internal source, e.g. the random
    /// generator whose alphabet is a subset of the valid class.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShortCode {
    type Err = InvalidCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShortCode {
    type Error = InvalidCode;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(code)
    }
}
