//! Coupon Codes

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Shortest accepted code
pub const MIN_CODE_LEN: usize = 3;

/// Longest accepted code
pub const MAX_CODE_LEN: usize = 32;

/// The redeemable string printed on a voucher.
///
/// Codes are stored trimmed and uppercased, so `save10` and ` SAVE10 ` are the same code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Normalise and validate a code.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the code is empty, too short or long, or contains
    /// characters other than ASCII letters, digits, `-` and `_`.
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        let normalized = code.trim().to_ascii_uppercase();

        if normalized.is_empty() {
            return Err(ValidationError::EmptyCode);
        }

        if let Some(invalid) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ValidationError::InvalidCodeCharacter(invalid));
        }

        // All characters are ASCII at this point, so bytes == chars.
        let len = normalized.len();

        if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&len) {
            return Err(ValidationError::CodeLength {
                min: MIN_CODE_LEN,
                max: MAX_CODE_LEN,
                len,
            });
        }

        Ok(Self(normalized))
    }

    /// Normalised code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CouponCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CouponCode> for String {
    fn from(value: CouponCode) -> Self {
        value.0
    }
}
