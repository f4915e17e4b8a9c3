//! Discount Application Results

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    audience::AudienceKey,
    codes::{CouponCode, DiscountCode},
    discounts::DiscountType,
};

/// Outcome of a successful redemption.
///
/// Built once per redemption attempt and never changed afterwards. Two results are equal when
/// every field is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscountApplicationResult {
    code: CouponCode,
    discount_type: DiscountType,
    discount_value: Decimal,
    original_price: Decimal,
    discount_amount: Decimal,
    final_price: Decimal,
    audience_key: Option<AudienceKey>,
    was_capped: bool,
    evaluated_at: Timestamp,
    max_discount_amount: Option<Decimal>,
}

impl DiscountApplicationResult {
    /// `original_price` and `discount_amount` must already be rounded, with
    /// `0 <= discount_amount <= original_price`.
    pub(crate) fn new(
        code: &DiscountCode,
        original_price: Decimal,
        discount_amount: Decimal,
        audience_key: Option<AudienceKey>,
        was_capped: bool,
        evaluated_at: Timestamp,
    ) -> Self {
        Self {
            code: code.code().clone(),
            discount_type: code.discount().kind(),
            discount_value: code.discount().value(),
            original_price,
            discount_amount,
            final_price: original_price - discount_amount,
            audience_key,
            was_capped,
            evaluated_at,
            max_discount_amount: code.max_discount_amount(),
        }
    }

    /// Code that was applied
    pub fn code(&self) -> &CouponCode {
        &self.code
    }

    /// Type of the applied discount
    pub const fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    /// Configured discount value: percentage points or fixed amount
    pub const fn discount_value(&self) -> Decimal {
        self.discount_value
    }

    /// Price before the discount, rounded to two places
    pub const fn original_price(&self) -> Decimal {
        self.original_price
    }

    /// Amount taken off, rounded to two places
    pub const fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    /// Price after the discount
    pub const fn final_price(&self) -> Decimal {
        self.final_price
    }

    /// Audience the redemption was evaluated for
    pub fn audience_key(&self) -> Option<&AudienceKey> {
        self.audience_key.as_ref()
    }

    /// Whether the maximum discount amount reduced the discount
    pub const fn was_capped(&self) -> bool {
        self.was_capped
    }

    /// When the redemption was evaluated
    pub const fn evaluated_at(&self) -> Timestamp {
        self.evaluated_at
    }

    /// Cap configured on the code at evaluation time
    pub const fn max_discount_amount(&self) -> Option<Decimal> {
        self.max_discount_amount
    }
}
