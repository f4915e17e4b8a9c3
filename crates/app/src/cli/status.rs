use std::io;

use clap::Args;
use jiff::Timestamp;
use voucher::{audience::AudienceKey, codes::CouponCode};
use voucher_app::context::AppContext;

use crate::cli::write_failed;

#[derive(Debug, Args)]
pub(crate) struct StatusArgs {
    /// Discount code as entered by the customer
    #[arg(long)]
    code: CouponCode,

    /// Audience key of the customer, if any
    #[arg(long)]
    audience: Option<AudienceKey>,

    /// Instant to check at; defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(
    args: StatusArgs,
    context: &AppContext,
    mut out: impl io::Write,
) -> Result<(), String> {
    let record = context
        .discount_codes
        .get_code(context.tenant, args.code.clone())
        .await
        .map_err(|error| format!("failed to find {}: {error}", args.code))?;

    let at = args.at.unwrap_or_else(|| context.clock.now());

    let written = match context
        .policy
        .check_eligibility(&record.code, at, args.audience.as_ref())
    {
        Ok(()) => match record.code.remaining_uses() {
            Some(remaining) => writeln!(out, "{}: eligible, {remaining} uses remaining", args.code),
            None => writeln!(out, "{}: eligible", args.code),
        },
        Err(reason) => writeln!(out, "{}: not eligible, {reason}", args.code),
    };

    written.map_err(write_failed)
}
