//! Redemption Errors

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed input, rejected before any eligibility decision is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Prices must not be negative.
    #[error("original price must not be negative, got {0}")]
    NegativePrice(Decimal),

    /// Percentage discounts must lie within 0 to 100 inclusive.
    #[error("percentage discount must be between 0 and 100, got {0}")]
    PercentageOutOfRange(Decimal),

    /// Fixed amount discounts must not be negative.
    #[error("fixed discount amount must not be negative, got {0}")]
    NegativeFixedAmount(Decimal),

    /// A maximum discount cap must not be negative.
    #[error("maximum discount amount must not be negative, got {0}")]
    NegativeCap(Decimal),

    /// Code was empty after trimming.
    #[error("discount code must not be empty")]
    EmptyCode,

    /// Code length is outside the accepted range.
    #[error("discount code must be between {min} and {max} characters, got {len}")]
    CodeLength {
        /// Minimum accepted length
        min: usize,
        /// Maximum accepted length
        max: usize,
        /// Length of the rejected code
        len: usize,
    },

    /// Code contained a character outside `A-Z`, `0-9`, `-` and `_`.
    #[error("discount code contains invalid character {0:?}")]
    InvalidCodeCharacter(char),

    /// Audience keys must contain something other than whitespace.
    #[error("audience key must not be blank")]
    BlankAudienceKey,

    /// The validity window would never contain any instant.
    #[error("validity window starts at {starts_at} but ends at {ends_at}")]
    EmptyValidityWindow {
        /// Inclusive start
        starts_at: Timestamp,
        /// Exclusive end
        ends_at: Timestamp,
    },

    /// Intermediate arithmetic left the representable decimal range.
    #[error("discount calculation overflowed")]
    AmountOverflow,
}

/// Reasons a well-formed redemption is refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IneligibleRedemption {
    /// The code has been deactivated by an administrator.
    #[error("discount code is no longer active")]
    Inactive,

    /// The validity window has not opened yet.
    #[error("discount code is not valid until {starts_at}")]
    NotYetActive {
        /// When the code becomes redeemable
        starts_at: Timestamp,
    },

    /// The validity window has closed.
    #[error("discount code expired at {ends_at}")]
    Expired {
        /// When the code stopped being redeemable
        ends_at: Timestamp,
    },

    /// The code is restricted to an audience the caller does not belong to.
    #[error("discount code is not available for this customer")]
    AudienceMismatch,

    /// Every permitted use has been consumed.
    #[error("discount code has reached its usage limit of {limit}")]
    UsageExhausted {
        /// Configured usage limit
        limit: u32,
    },
}

/// Failure of a redemption attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RedemptionError {
    /// Input was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Input was fine but the code cannot be applied.
    #[error(transparent)]
    Ineligible(#[from] IneligibleRedemption),
}
