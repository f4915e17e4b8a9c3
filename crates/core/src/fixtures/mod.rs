//! Fixtures
//!
//! Discount codes described in YAML, as used to seed stores and drive the CLI.
//!
//! ```yaml
//! codes:
//!   - code: SUMMER10
//!     discount:
//!       type: percentage
//!       value: 10
//!     max_discount_amount: "25.00"
//!     audience_key: members
//!     ends_at: "2026-09-01T00:00:00Z"
//!     usage_limit: 500
//! ```
//!
//! [`save_codes`] writes the same format back, including usage, so a file can act as a store.

use std::{fs, path::Path};

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    audience::AudienceKey,
    codes::{CouponCode, DiscountCode, Usage},
    discounts::{DiscountType, DiscountValue},
    errors::ValidationError,
    validity::ValidityWindow,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or encoding error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A code definition failed validation
    #[error("Invalid discount code {code:?}: {source}")]
    InvalidCode {
        /// Code as written in the fixture
        code: String,

        /// Validation failure
        #[source]
        source: ValidationError,
    },

    /// The same code (after normalisation) appears more than once
    #[error("Duplicate discount code: {0}")]
    DuplicateCode(CouponCode),
}

/// Wrapper for discount codes in YAML
#[derive(Debug, Serialize, Deserialize)]
pub struct DiscountCodesFixture {
    /// Code definitions, in file order
    pub codes: Vec<DiscountCodeFixture>,
}

/// Discount configuration from YAML
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscountFixture {
    /// Discount type
    #[serde(rename = "type")]
    pub kind: DiscountType,

    /// Percentage points or fixed amount
    pub value: Decimal,
}

/// Discount code definition from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscountCodeFixture {
    /// Redeemable code
    pub code: String,

    /// Discount granted
    pub discount: DiscountFixture,

    /// Optional cap per redemption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<Decimal>,

    /// Optional audience restriction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_key: Option<String>,

    /// Inclusive start of the validity window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<Timestamp>,

    /// Exclusive end of the validity window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<Timestamp>,

    /// Optional usage limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,

    /// Redemptions already made
    #[serde(default)]
    pub times_used: u32,

    /// When the code was last redeemed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_redeemed_at: Option<Timestamp>,

    /// Whether the code is still active
    #[serde(default = "active_by_default")]
    pub active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl DiscountCodeFixture {
    /// Convert to a validated [`DiscountCode`].
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidCode`] if any field fails validation.
    pub fn try_into_code(self) -> Result<DiscountCode, FixtureError> {
        let raw = self.code.clone();

        self.build().map_err(|source| FixtureError::InvalidCode { code: raw, source })
    }

    fn build(self) -> Result<DiscountCode, ValidationError> {
        let code = CouponCode::new(&self.code)?;
        let discount = DiscountValue::new(self.discount.kind, self.discount.value)?;
        let validity = ValidityWindow::new(self.starts_at, self.ends_at)?;

        let mut discount_code = DiscountCode::new(code, discount)
            .with_validity(validity)
            .with_usage(Usage {
                limit: self.usage_limit,
                times_used: self.times_used,
                last_redeemed_at: self.last_redeemed_at,
            });

        if let Some(cap) = self.max_discount_amount {
            discount_code = discount_code.with_max_discount_amount(cap)?;
        }

        if let Some(audience) = self.audience_key {
            discount_code = discount_code.with_audience(AudienceKey::new(&audience)?);
        }

        if !self.active {
            discount_code.deactivate();
        }

        Ok(discount_code)
    }
}

impl From<&DiscountCode> for DiscountCodeFixture {
    fn from(code: &DiscountCode) -> Self {
        let discount = code.discount();
        let validity = code.validity();
        let usage = code.usage();

        Self {
            code: code.code().to_string(),
            discount: DiscountFixture {
                kind: discount.kind(),
                value: discount.value(),
            },
            max_discount_amount: code.max_discount_amount(),
            audience_key: code.audience().map(ToString::to_string),
            starts_at: validity.starts_at(),
            ends_at: validity.ends_at(),
            usage_limit: usage.limit,
            times_used: usage.times_used,
            last_redeemed_at: usage.last_redeemed_at,
            active: code.is_active(),
        }
    }
}

/// Parse discount codes from a YAML document.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a code is invalid, or two entries normalise to
/// the same code.
pub fn parse_codes(yaml: &str) -> Result<Vec<DiscountCode>, FixtureError> {
    let fixture: DiscountCodesFixture = serde_norway::from_str(yaml)?;

    let mut seen = FxHashSet::default();
    let mut codes = Vec::with_capacity(fixture.codes.len());

    for entry in fixture.codes {
        let code = entry.try_into_code()?;

        if !seen.insert(code.code().clone()) {
            return Err(FixtureError::DuplicateCode(code.code().clone()));
        }

        codes.push(code);
    }

    Ok(codes)
}

/// Load discount codes from a YAML fixture file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or for any reason listed on [`parse_codes`].
pub fn load_codes(path: impl AsRef<Path>) -> Result<Vec<DiscountCode>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_codes(&contents)
}

/// Render discount codes as a YAML document readable by [`parse_codes`].
///
/// # Errors
///
/// Returns [`FixtureError::Yaml`] if encoding fails.
pub fn render_codes(codes: &[DiscountCode]) -> Result<String, FixtureError> {
    let fixture = DiscountCodesFixture {
        codes: codes.iter().map(DiscountCodeFixture::from).collect(),
    };

    Ok(serde_norway::to_string(&fixture)?)
}

/// Write discount codes, with their usage and status, to a YAML fixture file.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn save_codes(path: impl AsRef<Path>, codes: &[DiscountCode]) -> Result<(), FixtureError> {
    let contents = render_codes(codes)?;

    fs::write(path, contents)?;

    Ok(())
}
