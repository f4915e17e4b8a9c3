//! Discount Codes

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    audience::AudienceKey,
    discounts::DiscountValue,
    errors::{IneligibleRedemption, RedemptionError, ValidationError},
    redemption::{DiscountApplicationResult, DiscountRedemptionPolicy},
    validity::ValidityWindow,
};

mod coupon_code;

pub use coupon_code::{CouponCode, MAX_CODE_LEN, MIN_CODE_LEN};

/// Usage bookkeeping for a discount code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Usage {
    /// Maximum number of redemptions, unlimited when `None`
    pub limit: Option<u32>,

    /// Number of successful redemptions so far
    pub times_used: u32,

    /// When the code was last redeemed
    pub last_redeemed_at: Option<Timestamp>,
}

impl Usage {
    /// Uses left before the limit is reached, `None` when unlimited
    pub fn remaining(&self) -> Option<u32> {
        self.limit
            .map(|limit| limit.saturating_sub(self.times_used))
    }

    /// Fail if every permitted use has been consumed.
    ///
    /// # Errors
    ///
    /// Returns [`IneligibleRedemption::UsageExhausted`] once `times_used` reaches the limit.
    pub fn check(&self) -> Result<(), IneligibleRedemption> {
        match self.limit {
            Some(limit) if self.times_used >= limit => {
                Err(IneligibleRedemption::UsageExhausted { limit })
            }
            _ => Ok(()),
        }
    }
}

/// A redeemable discount code and its restrictions.
///
/// Codes are never deleted: once retired they are deactivated and remain for auditing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountCode {
    code: CouponCode,
    discount: DiscountValue,
    max_discount_amount: Option<Decimal>,
    audience: Option<AudienceKey>,
    validity: ValidityWindow,
    usage: Usage,
    active: bool,
}

impl DiscountCode {
    /// Create an active, unrestricted code.
    #[must_use]
    pub fn new(code: CouponCode, discount: DiscountValue) -> Self {
        Self {
            code,
            discount,
            max_discount_amount: None,
            audience: None,
            validity: ValidityWindow::unbounded(),
            usage: Usage::default(),
            active: true,
        }
    }

    /// Cap the discount granted by a single redemption.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeCap`] if `cap` is negative.
    pub fn with_max_discount_amount(mut self, cap: Decimal) -> Result<Self, ValidationError> {
        if cap < Decimal::ZERO {
            return Err(ValidationError::NegativeCap(cap));
        }

        self.max_discount_amount = Some(cap);

        Ok(self)
    }

    /// Restrict the code to a customer segment.
    #[must_use]
    pub fn with_audience(mut self, audience: AudienceKey) -> Self {
        self.audience = Some(audience);
        self
    }

    /// Limit when the code may be redeemed.
    #[must_use]
    pub fn with_validity(mut self, validity: ValidityWindow) -> Self {
        self.validity = validity;
        self
    }

    /// Limit how many times the code may be redeemed.
    #[must_use]
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage.limit = Some(limit);
        self
    }

    /// Restore usage counters, e.g. when rehydrating a stored code.
    #[must_use]
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    /// Code
    pub fn code(&self) -> &CouponCode {
        &self.code
    }

    /// Discount granted
    pub const fn discount(&self) -> DiscountValue {
        self.discount
    }

    /// Per-redemption cap on the discount amount
    pub const fn max_discount_amount(&self) -> Option<Decimal> {
        self.max_discount_amount
    }

    /// Audience the code is restricted to
    pub fn audience(&self) -> Option<&AudienceKey> {
        self.audience.as_ref()
    }

    /// Redemption window
    pub const fn validity(&self) -> ValidityWindow {
        self.validity
    }

    /// Usage counters
    pub const fn usage(&self) -> Usage {
        self.usage
    }

    /// Uses left, `None` when unlimited
    pub fn remaining_uses(&self) -> Option<u32> {
        self.usage.remaining()
    }

    /// Whether the code has not been deactivated
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Retire the code. Further redemptions fail with [`IneligibleRedemption::Inactive`].
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Evaluate a redemption and, if it succeeds, record the use.
    ///
    /// A failed evaluation leaves the code untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`RedemptionError`] when the input is malformed or the code is not eligible;
    /// see [`DiscountRedemptionPolicy::evaluate`].
    pub fn redeem(
        &mut self,
        policy: &DiscountRedemptionPolicy,
        original_price: Decimal,
        evaluated_at: Timestamp,
        audience: Option<&AudienceKey>,
    ) -> Result<DiscountApplicationResult, RedemptionError> {
        let result = policy.evaluate(self, original_price, evaluated_at, audience)?;

        self.usage.times_used = self.usage.times_used.saturating_add(1);
        self.usage.last_redeemed_at = Some(evaluated_at);

        Ok(result)
    }
}
