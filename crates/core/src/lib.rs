//! Voucher
//!
//! Voucher evaluates discount codes against order subtotals: eligibility, capping and rounding,
//! producing an immutable record of what was applied.

pub mod audience;
pub mod codes;
pub mod discounts;
pub mod errors;
pub mod fixtures;
pub mod prelude;
pub mod redemption;
pub mod report;
pub mod validity;
