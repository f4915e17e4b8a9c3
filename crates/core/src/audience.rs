//! Audience Keys

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Segmentation tag restricting which customers may redeem a code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AudienceKey(String);

impl AudienceKey {
    /// Create an audience key, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankAudienceKey`] if nothing remains after trimming.
    pub fn new(key: &str) -> Result<Self, ValidationError> {
        let trimmed = key.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::BlankAudienceKey);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Key as originally cased
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudienceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AudienceKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AudienceKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<AudienceKey> for String {
    fn from(value: AudienceKey) -> Self {
        value.0
    }
}

/// How a code's audience key is compared with the caller's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceMatch {
    /// Keys must be byte-for-byte equal.
    Exact,

    /// Keys are compared after Unicode lowercasing.
    #[default]
    CaseInsensitive,
}

impl AudienceMatch {
    /// Whether `candidate` satisfies a code restricted to `required`.
    pub fn matches(&self, required: &AudienceKey, candidate: &AudienceKey) -> bool {
        match self {
            Self::Exact => required.0 == candidate.0,
            Self::CaseInsensitive => required.0.to_lowercase() == candidate.0.to_lowercase(),
        }
    }
}

impl FromStr for AudienceMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "case_insensitive" | "case-insensitive" => Ok(Self::CaseInsensitive),
            other => Err(format!("unknown audience match policy: {other}")),
        }
    }
}
