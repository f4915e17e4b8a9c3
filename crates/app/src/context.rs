//! App Context

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;
use tracing::info;
use voucher::{
    codes::DiscountCode,
    fixtures::{FixtureError, load_codes, save_codes},
    redemption::DiscountRedemptionPolicy,
};

use crate::{
    clock::{Clock, SystemClock},
    config::AppConfig,
    domain::discount_codes::{
        DiscountCodesManager, DiscountCodesService, DiscountCodesServiceError,
        InMemoryDiscountCodesRepository,
    },
    uuids::TenantUuid,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load discount codes")]
    Fixture(#[from] FixtureError),

    #[error("failed to store discount code {code}")]
    Seed {
        code: String,
        #[source]
        source: DiscountCodesServiceError,
    },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read discount codes back from the store: {0}")]
    List(#[source] DiscountCodesServiceError),

    #[error("failed to write discount codes: {0}")]
    Fixture(#[from] FixtureError),
}

#[derive(Clone)]
pub struct AppContext {
    pub tenant: TenantUuid,
    pub policy: DiscountRedemptionPolicy,
    pub clock: Arc<dyn Clock>,
    pub discount_codes: Arc<dyn DiscountCodesService>,
    /// File the codes were loaded from, and are written back to by [`AppContext::persist`].
    pub codes_file: Option<PathBuf>,
}

impl AppContext {
    /// Build application context from the configured codes file.
    ///
    /// # Errors
    ///
    /// Returns an error when the codes file cannot be loaded or a code cannot be stored.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let codes = load_codes(&config.codes)?;

        let context = Self::seeded(
            config.tenant.unwrap_or_else(TenantUuid::new),
            config.policy(),
            Arc::new(SystemClock),
            codes,
        )
        .await?;

        Ok(Self {
            codes_file: Some(config.codes.clone()),
            ..context
        })
    }

    /// Build application context over an in-memory store holding `codes`. Nothing is
    /// persisted until `codes_file` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when a code cannot be stored.
    pub async fn seeded(
        tenant: TenantUuid,
        policy: DiscountRedemptionPolicy,
        clock: Arc<dyn Clock>,
        codes: Vec<DiscountCode>,
    ) -> Result<Self, AppInitError> {
        let service = DiscountCodesManager::new(
            Arc::new(InMemoryDiscountCodesRepository::new()),
            Arc::clone(&clock),
            policy,
        );

        let count = codes.len();

        for code in codes {
            let name = code.code().to_string();

            service
                .create_code(tenant, code.into())
                .await
                .map_err(|source| AppInitError::Seed { code: name, source })?;
        }

        info!(tenant_uuid = %tenant, count, "loaded discount codes");

        Ok(Self {
            tenant,
            policy,
            clock,
            discount_codes: Arc::new(service),
            codes_file: None,
        })
    }

    /// Write the tenant's codes, including usage and status, back to `codes_file`.
    ///
    /// Does nothing when the context was not loaded from a file.
    ///
    /// # Errors
    ///
    /// Returns an error when the codes cannot be listed or the file cannot be written.
    pub async fn persist(&self) -> Result<(), PersistError> {
        let Some(path) = &self.codes_file else {
            return Ok(());
        };

        let codes: Vec<DiscountCode> = self
            .discount_codes
            .list_codes(self.tenant)
            .await
            .map_err(PersistError::List)?
            .into_iter()
            .map(|record| record.code)
            .collect();

        save_codes(path, &codes)?;

        info!(path = %path.display(), count = codes.len(), "saved discount codes");

        Ok(())
    }
}
