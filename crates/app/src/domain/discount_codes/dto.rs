//! Discount Codes DTOs

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use voucher::{discounts::DiscountType, redemption::DiscountApplicationResult};

use crate::{domain::discount_codes::records::DiscountCodeRecord, uuids::DiscountCodeUuid};

/// Outcome of a quote or redemption, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountApplicationResultDto {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub original_price: Decimal,
    pub discount_amount: Decimal,
    pub final_price: Decimal,
    pub audience_key: Option<String>,
    pub was_capped: bool,
    pub evaluated_at: Timestamp,
    pub max_discount_amount: Option<Decimal>,
}

impl From<&DiscountApplicationResult> for DiscountApplicationResultDto {
    fn from(result: &DiscountApplicationResult) -> Self {
        Self {
            code: result.code().to_string(),
            discount_type: result.discount_type(),
            discount_value: result.discount_value(),
            original_price: result.original_price(),
            discount_amount: result.discount_amount(),
            final_price: result.final_price(),
            audience_key: result.audience_key().map(ToString::to_string),
            was_capped: result.was_capped(),
            evaluated_at: result.evaluated_at(),
            max_discount_amount: result.max_discount_amount(),
        }
    }
}

/// Admin view of a stored discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCodeSummaryDto {
    pub uuid: DiscountCodeUuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_discount_amount: Option<Decimal>,
    pub audience_key: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub usage_limit: Option<u32>,
    pub times_used: u32,
    pub last_redeemed_at: Option<Timestamp>,
    pub active: bool,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&DiscountCodeRecord> for DiscountCodeSummaryDto {
    fn from(record: &DiscountCodeRecord) -> Self {
        let code = &record.code;
        let usage = code.usage();

        Self {
            uuid: record.uuid,
            code: code.code().to_string(),
            discount_type: code.discount().kind(),
            discount_value: code.discount().value(),
            max_discount_amount: code.max_discount_amount(),
            audience_key: code.audience().map(ToString::to_string),
            starts_at: code.validity().starts_at(),
            ends_at: code.validity().ends_at(),
            usage_limit: usage.limit,
            times_used: usage.times_used,
            last_redeemed_at: usage.last_redeemed_at,
            active: code.is_active(),
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
