//! Redemption
//!
//! Decides whether a discount code applies to an order and what it is worth. Evaluation is a
//! pure function of its inputs; persisting the resulting usage is left to the caller.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    audience::{AudienceKey, AudienceMatch},
    codes::DiscountCode,
    discounts::round_money,
    errors::{IneligibleRedemption, RedemptionError, ValidationError},
};

mod result;

pub use result::DiscountApplicationResult;

/// Eligibility and pricing rules for discount code redemption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DiscountRedemptionPolicy {
    audience_match: AudienceMatch,
}

impl DiscountRedemptionPolicy {
    /// Create a policy comparing audience keys with `audience_match`.
    #[must_use]
    pub const fn new(audience_match: AudienceMatch) -> Self {
        Self { audience_match }
    }

    /// Audience comparison in use
    pub const fn audience_match(&self) -> AudienceMatch {
        self.audience_match
    }

    /// Check that `code` may be redeemed at `evaluated_at` by `audience`.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`IneligibleRedemption`] reason, checked in the order:
    /// deactivated, not yet active, expired, audience mismatch, usage exhausted.
    pub fn check_eligibility(
        &self,
        code: &DiscountCode,
        evaluated_at: Timestamp,
        audience: Option<&AudienceKey>,
    ) -> Result<(), IneligibleRedemption> {
        if !code.is_active() {
            return Err(IneligibleRedemption::Inactive);
        }

        code.validity().check(evaluated_at)?;

        if let Some(required) = code.audience() {
            let matched =
                audience.is_some_and(|candidate| self.audience_match.matches(required, candidate));

            if !matched {
                return Err(IneligibleRedemption::AudienceMismatch);
            }
        }

        code.usage().check()
    }

    /// Evaluate `code` against an order subtotal.
    ///
    /// Eligibility is decided before the price is validated, so an expired code is reported as
    /// ineligible whatever price accompanies it.
    ///
    /// # Errors
    ///
    /// - [`RedemptionError::Ineligible`]: see [`DiscountRedemptionPolicy::check_eligibility`].
    /// - [`RedemptionError::Validation`]: `original_price` is negative, or the calculation
    ///   overflowed.
    pub fn evaluate(
        &self,
        code: &DiscountCode,
        original_price: Decimal,
        evaluated_at: Timestamp,
        audience: Option<&AudienceKey>,
    ) -> Result<DiscountApplicationResult, RedemptionError> {
        self.check_eligibility(code, evaluated_at, audience)?;

        if original_price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(original_price).into());
        }

        let raw = code.discount().raw_discount(original_price)?;

        let capped = code.max_discount_amount().map_or(raw, |cap| raw.min(cap));
        let was_capped = raw > capped;

        let discount_amount = round_money(capped.min(original_price));
        let original_price = round_money(original_price);

        Ok(DiscountApplicationResult::new(
            code,
            original_price,
            discount_amount,
            audience.cloned(),
            was_capped,
            evaluated_at,
        ))
    }
}
