//! Report
//!
//! Terminal tables for discount codes and redemption results.

use std::io;

use tabled::{builder::Builder, settings::Style};

use crate::{codes::DiscountCode, redemption::DiscountApplicationResult};

const NONE: &str = "-";

/// Write a table listing `codes`, one row per code.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_codes(mut out: impl io::Write, codes: &[DiscountCode]) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record([
        "Code",
        "Discount",
        "Cap",
        "Audience",
        "Starts",
        "Ends",
        "Used",
        "Remaining",
        "Active",
    ]);

    for code in codes {
        let validity = code.validity();
        let usage = code.usage();

        builder.push_record([
            code.code().to_string(),
            code.discount().to_string(),
            optional(code.max_discount_amount()),
            optional(code.audience()),
            optional(validity.starts_at()),
            optional(validity.ends_at()),
            usage.times_used.to_string(),
            code.remaining_uses()
                .map_or_else(|| "unlimited".to_string(), |v| v.to_string()),
            if code.is_active() { "yes" } else { "no" }.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")
}

/// Write a two-column summary of a redemption result.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_result(mut out: impl io::Write, result: &DiscountApplicationResult) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Code".to_string(), result.code().to_string()]);
    builder.push_record([
        "Discount".to_string(),
        format!("{} {}", result.discount_type(), result.discount_value()),
    ]);
    builder.push_record([
        "Original Price".to_string(),
        result.original_price().to_string(),
    ]);
    builder.push_record([
        "Discount Amount".to_string(),
        result.discount_amount().to_string(),
    ]);
    builder.push_record([
        "Final Price".to_string(),
        result.final_price().to_string(),
    ]);
    builder.push_record([
        "Capped".to_string(),
        match (result.was_capped(), result.max_discount_amount()) {
            (true, Some(cap)) => format!("yes (max {cap})"),
            _ => "no".to_string(),
        },
    ]);
    builder.push_record([
        "Audience".to_string(),
        optional(result.audience_key()),
    ]);
    builder.push_record([
        "Evaluated At".to_string(),
        result.evaluated_at().to_string(),
    ]);

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NONE.to_string(), |v| v.to_string())
}
