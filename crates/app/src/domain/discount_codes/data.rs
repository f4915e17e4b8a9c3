//! Discount Codes Data

use rust_decimal::Decimal;
use voucher::{
    audience::AudienceKey,
    codes::{CouponCode, DiscountCode},
};

use crate::uuids::DiscountCodeUuid;

/// New Discount Code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscountCode {
    pub uuid: DiscountCodeUuid,
    pub code: DiscountCode,
}

impl From<DiscountCode> for NewDiscountCode {
    fn from(code: DiscountCode) -> Self {
        Self {
            uuid: DiscountCodeUuid::new(),
            code,
        }
    }
}

/// Redemption Request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionRequest {
    pub code: CouponCode,
    pub original_price: Decimal,
    pub audience: Option<AudienceKey>,
}
