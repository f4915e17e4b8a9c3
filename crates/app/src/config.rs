//! Application configuration

use std::path::PathBuf;

use clap::Args;
use voucher::{audience::AudienceMatch, redemption::DiscountRedemptionPolicy};

use crate::uuids::TenantUuid;

/// Settings shared by every command, read from flags or the environment.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// YAML file holding the discount codes to load
    #[arg(long, global = true, env = "VOUCHER_CODES_FILE")]
    pub codes: PathBuf,

    /// Tenant owning the loaded codes; generated when omitted
    #[arg(long, global = true, env = "VOUCHER_TENANT")]
    pub tenant: Option<TenantUuid>,

    /// How audience keys are compared (exact, case-insensitive)
    #[arg(
        long,
        global = true,
        env = "VOUCHER_AUDIENCE_MATCH",
        default_value = "case-insensitive"
    )]
    pub audience_match: AudienceMatch,
}

impl AppConfig {
    #[must_use]
    pub const fn policy(&self) -> DiscountRedemptionPolicy {
        DiscountRedemptionPolicy::new(self.audience_match)
    }
}
