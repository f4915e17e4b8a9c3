//! Discount Code Records

use jiff::Timestamp;
use voucher::codes::DiscountCode;

use crate::uuids::{DiscountCodeUuid, TenantUuid};

/// Stored discount code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountCodeRecord {
    pub uuid: DiscountCodeUuid,
    pub tenant: TenantUuid,
    pub code: DiscountCode,
    /// Optimistic concurrency token, bumped by every successful save.
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
