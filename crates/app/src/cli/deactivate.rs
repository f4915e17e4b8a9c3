use std::io;

use clap::Args;
use voucher::codes::CouponCode;
use voucher_app::{context::AppContext, domain::discount_codes::dto::DiscountCodeSummaryDto};

use crate::cli::{persist, write_json};

#[derive(Debug, Args)]
pub(crate) struct DeactivateArgs {
    /// Discount code to retire
    #[arg(long)]
    code: CouponCode,
}

pub(crate) async fn run(
    args: DeactivateArgs,
    context: &AppContext,
    out: impl io::Write,
) -> Result<(), String> {
    let record = context
        .discount_codes
        .deactivate_code(context.tenant, args.code.clone())
        .await
        .map_err(|error| format!("failed to deactivate {}: {error}", args.code))?;

    persist(context).await?;

    write_json(out, &DiscountCodeSummaryDto::from(&record))
}
