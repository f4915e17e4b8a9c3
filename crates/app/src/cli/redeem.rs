use std::io;

use clap::Args;
use voucher::{redemption::DiscountApplicationResult, report};
use voucher_app::{
    context::AppContext, domain::discount_codes::dto::DiscountApplicationResultDto,
};

use crate::cli::{RedemptionArgs, persist, write_failed, write_json};

#[derive(Debug, Args)]
pub(crate) struct RedeemArgs {
    #[command(flatten)]
    redemption: RedemptionArgs,

    /// Number of times to redeem the code; stops at the first failure
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    times: u32,
}

pub(crate) async fn run(
    args: RedeemArgs,
    context: &AppContext,
    mut out: impl io::Write,
) -> Result<(), String> {
    let RedeemArgs { redemption, times } = args;
    let mut results = Vec::new();

    for attempt in 1..=times {
        let result = context
            .discount_codes
            .redeem(context.tenant, redemption.request())
            .await
            .map_err(|error| {
                format!(
                    "redemption {attempt} of {times} for {} failed: {error}",
                    redemption.code
                )
            });

        match result {
            Ok(result) => results.push(result),
            Err(error) => {
                if !results.is_empty() {
                    persist(context).await?;
                }

                write_results(&mut out, &results, redemption.json)?;
                return Err(error);
            }
        }
    }

    persist(context).await?;

    write_results(out, &results, redemption.json)
}

fn write_results(
    mut out: impl io::Write,
    results: &[DiscountApplicationResult],
    json: bool,
) -> Result<(), String> {
    if json {
        let dtos: Vec<_> = results
            .iter()
            .map(DiscountApplicationResultDto::from)
            .collect();

        return write_json(out, &dtos);
    }

    for result in results {
        report::write_result(&mut out, result).map_err(write_failed)?;
    }

    Ok(())
}
