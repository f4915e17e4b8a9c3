use std::io;

use clap::Args;
use voucher::report;
use voucher_app::{
    context::AppContext, domain::discount_codes::dto::DiscountApplicationResultDto,
};

use crate::cli::{RedemptionArgs, write_failed, write_json};

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    #[command(flatten)]
    redemption: RedemptionArgs,
}

pub(crate) async fn run(
    args: QuoteArgs,
    context: &AppContext,
    out: impl io::Write,
) -> Result<(), String> {
    let args = args.redemption;

    let result = context
        .discount_codes
        .quote(context.tenant, args.request())
        .await
        .map_err(|error| format!("cannot apply {}: {error}", args.code))?;

    if args.json {
        return write_json(out, &DiscountApplicationResultDto::from(&result));
    }

    report::write_result(out, &result).map_err(write_failed)
}
