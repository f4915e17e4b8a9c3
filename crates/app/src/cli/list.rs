use std::io;

use clap::Args;
use voucher::{codes::DiscountCode, report};
use voucher_app::{context::AppContext, domain::discount_codes::dto::DiscountCodeSummaryDto};

use crate::cli::{write_failed, write_json};

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run(
    args: ListArgs,
    context: &AppContext,
    out: impl io::Write,
) -> Result<(), String> {
    let records = context
        .discount_codes
        .list_codes(context.tenant)
        .await
        .map_err(|error| format!("failed to list discount codes: {error}"))?;

    if args.json {
        let summaries: Vec<_> = records.iter().map(DiscountCodeSummaryDto::from).collect();

        return write_json(out, &summaries);
    }

    let codes: Vec<DiscountCode> = records.into_iter().map(|record| record.code).collect();

    report::write_codes(out, &codes).map_err(write_failed)
}
