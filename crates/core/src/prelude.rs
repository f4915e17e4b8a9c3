//! Voucher prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    audience::{AudienceKey, AudienceMatch},
    codes::{CouponCode, DiscountCode, Usage},
    discounts::{DiscountType, DiscountValue, round_money},
    errors::{IneligibleRedemption, RedemptionError, ValidationError},
    fixtures::{FixtureError, load_codes, parse_codes, render_codes, save_codes},
    redemption::{DiscountApplicationResult, DiscountRedemptionPolicy},
    validity::ValidityWindow,
};
