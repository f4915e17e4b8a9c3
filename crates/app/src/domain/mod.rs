//! Voucher Domain Concerns

pub mod discount_codes;
