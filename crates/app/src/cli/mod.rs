use std::io;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use voucher::{audience::AudienceKey, codes::CouponCode};
use voucher_app::{
    config::AppConfig, context::AppContext, domain::discount_codes::data::RedemptionRequest,
};

mod check;
mod deactivate;
mod list;
mod quote;
mod redeem;
mod status;

#[derive(Debug, Parser)]
#[command(name = "voucher-app", about = "Discount code redemption", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate the codes file
    Check,
    /// List loaded discount codes
    List(list::ListArgs),
    /// Show whether a code can be used
    Status(status::StatusArgs),
    /// Price an order with a code without using it up
    Quote(quote::QuoteArgs),
    /// Apply a code, recording each use
    Redeem(redeem::RedeemArgs),
    /// Deactivate a code
    Deactivate(deactivate::DeactivateArgs),
}

/// Order details shared by the pricing commands.
#[derive(Debug, Args)]
pub(crate) struct RedemptionArgs {
    /// Discount code as entered by the customer
    #[arg(long)]
    code: CouponCode,

    /// Order price before discount
    #[arg(long)]
    price: Decimal,

    /// Audience key of the customer, if any
    #[arg(long)]
    audience: Option<AudienceKey>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl RedemptionArgs {
    fn request(&self) -> RedemptionRequest {
        RedemptionRequest {
            code: self.code.clone(),
            original_price: self.price,
            audience: self.audience.clone(),
        }
    }
}

impl Cli {
    /// Load `.env`, then parse flags and environment.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self, context: &AppContext, out: impl io::Write) -> Result<(), String> {
        match self.command {
            Commands::Check => check::run(context, out).await,
            Commands::List(args) => list::run(args, context, out).await,
            Commands::Status(args) => status::run(args, context, out).await,
            Commands::Quote(args) => quote::run(args, context, out).await,
            Commands::Redeem(args) => redeem::run(args, context, out).await,
            Commands::Deactivate(args) => deactivate::run(args, context, out).await,
        }
    }
}

fn write_json(mut out: impl io::Write, value: &impl serde::Serialize) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut out, value)
        .map_err(|error| format!("failed to encode output: {error}"))?;

    writeln!(out).map_err(write_failed)
}

fn write_failed(error: io::Error) -> String {
    format!("failed to write output: {error}")
}

async fn persist(context: &AppContext) -> Result<(), String> {
    context
        .persist()
        .await
        .map_err(|error| error.to_string())
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::{io::Write, sync::Arc};

    use jiff::Timestamp;
    use tempfile::NamedTempFile;
    use voucher::{
        audience::AudienceMatch,
        codes::DiscountCode, discounts::DiscountValue, errors::ValidationError,
        redemption::DiscountRedemptionPolicy,
    };
    use voucher_app::{
        clock::MockClock,
        domain::discount_codes::{MockDiscountCodesService, records::DiscountCodeRecord},
        uuids::{DiscountCodeUuid, TenantUuid},
    };

    use super::*;

    pub(crate) fn context(service: MockDiscountCodesService) -> AppContext {
        context_for(TenantUuid::new(), service)
    }

    pub(crate) fn context_for(tenant: TenantUuid, service: MockDiscountCodesService) -> AppContext {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(Timestamp::constant(1_780_000_000, 0));

        AppContext {
            tenant,
            policy: DiscountRedemptionPolicy::default(),
            clock: Arc::new(clock),
            discount_codes: Arc::new(service),
            codes_file: None,
        }
    }

    pub(crate) fn record(
        code: &str,
        percent: i64,
    ) -> Result<DiscountCodeRecord, Box<dyn std::error::Error>> {
        let now = Timestamp::from_second(1_780_000_000)?;

        Ok(DiscountCodeRecord {
            uuid: DiscountCodeUuid::new(),
            tenant: TenantUuid::new(),
            code: DiscountCode::new(
                CouponCode::new(code)?,
                DiscountValue::percentage(Decimal::from(percent))?,
            ),
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Writes `yaml` to a temporary codes file and returns a config pointing at it.
    pub(crate) fn codes_file(
        yaml: &str,
    ) -> Result<(NamedTempFile, AppConfig), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        file.write_all(yaml.as_bytes())?;

        let config = AppConfig {
            log_level: "warn".to_string(),
            codes: file.path().to_path_buf(),
            tenant: None,
            audience_match: AudienceMatch::default(),
        };

        Ok((file, config))
    }

    pub(crate) fn redemption_args(
        code: &str,
        price: i64,
        json: bool,
    ) -> Result<RedemptionArgs, ValidationError> {
        Ok(RedemptionArgs {
            code: CouponCode::new(code)?,
            price: Decimal::from(price),
            audience: None,
            json,
        })
    }
}
