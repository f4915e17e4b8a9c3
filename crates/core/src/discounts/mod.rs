//! Discounts
//!
//! Discount values and the arithmetic shared by every redemption: the uncapped discount for a
//! price, and rounding of monetary amounts.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Number of decimal places monetary amounts are rounded to.
pub const MONEY_DP: u32 = 2;

/// Kind of reduction a discount code grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// A percentage of the original price (e.g. "10% off")
    Percentage,

    /// A fixed amount off the original price (e.g. "£5 off")
    FixedAmount,
}

impl DiscountType {
    /// Stable name used in listings and serialized output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discount value whose magnitude is consistent with its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscountValue {
    kind: DiscountType,
    value: Decimal,
}

impl DiscountValue {
    /// Percentage discount, expressed in points (`10` means 10%).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PercentageOutOfRange`] unless `0 <= points <= 100`.
    pub fn percentage(points: Decimal) -> Result<Self, ValidationError> {
        if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(ValidationError::PercentageOutOfRange(points));
        }

        Ok(Self {
            kind: DiscountType::Percentage,
            value: points,
        })
    }

    /// Fixed amount discount.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeFixedAmount`] if `amount` is negative.
    pub fn fixed_amount(amount: Decimal) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeFixedAmount(amount));
        }

        Ok(Self {
            kind: DiscountType::FixedAmount,
            value: amount,
        })
    }

    /// Build a discount from a type tag and raw value, as read from storage or fixtures.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`DiscountValue::percentage`] and
    /// [`DiscountValue::fixed_amount`].
    pub fn new(kind: DiscountType, value: Decimal) -> Result<Self, ValidationError> {
        match kind {
            DiscountType::Percentage => Self::percentage(value),
            DiscountType::FixedAmount => Self::fixed_amount(value),
        }
    }

    /// Discount type
    pub const fn kind(&self) -> DiscountType {
        self.kind
    }

    /// Configured value: percentage points or a fixed amount
    pub const fn value(&self) -> Decimal {
        self.value
    }

    /// Discount this value grants on `original_price`, before any cap or rounding.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmountOverflow`] if the percentage calculation leaves the
    /// representable decimal range.
    pub fn raw_discount(&self, original_price: Decimal) -> Result<Decimal, ValidationError> {
        match self.kind {
            DiscountType::Percentage => original_price
                .checked_mul(self.value)
                .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
                .ok_or(ValidationError::AmountOverflow),
            DiscountType::FixedAmount => Ok(self.value),
        }
    }
}

impl fmt::Display for DiscountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiscountType::Percentage => write!(f, "{}%", self.value.normalize()),
            DiscountType::FixedAmount => write!(f, "{} off", self.value.normalize()),
        }
    }
}

/// Round a monetary amount to [`MONEY_DP`] places, halves away from zero.
///
/// The result always carries exactly [`MONEY_DP`] places, so `900` becomes `900.00`.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);

    rounded
}
