//! Discount Codes Service

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};
use voucher::{
    codes::CouponCode,
    redemption::{DiscountApplicationResult, DiscountRedemptionPolicy},
};

use crate::{
    clock::Clock,
    domain::discount_codes::{
        DiscountCodesServiceError,
        data::{NewDiscountCode, RedemptionRequest},
        records::DiscountCodeRecord,
        repository::DiscountCodesRepository,
    },
    uuids::TenantUuid,
};

/// Discount code service backed by any [`DiscountCodesRepository`].
#[derive(Clone)]
pub struct DiscountCodesManager {
    repository: Arc<dyn DiscountCodesRepository>,
    clock: Arc<dyn Clock>,
    policy: DiscountRedemptionPolicy,
}

impl DiscountCodesManager {
    #[must_use]
    pub fn new(
        repository: Arc<dyn DiscountCodesRepository>,
        clock: Arc<dyn Clock>,
        policy: DiscountRedemptionPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    async fn find(
        &self,
        tenant: TenantUuid,
        code: &CouponCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError> {
        self.repository
            .find_by_code(tenant, code)
            .await?
            .ok_or(DiscountCodesServiceError::NotFound)
    }
}

impl fmt::Debug for DiscountCodesManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountCodesManager")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DiscountCodesService for DiscountCodesManager {
    #[tracing::instrument(
        name = "discount_codes.service.create_code",
        skip(self, new_code),
        fields(
            tenant_uuid = %tenant,
            discount_code_uuid = %new_code.uuid,
            code = %new_code.code.code()
        ),
        err
    )]
    async fn create_code(
        &self,
        tenant: TenantUuid,
        new_code: NewDiscountCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError> {
        let now = self.clock.now();

        let record = self
            .repository
            .insert(DiscountCodeRecord {
                uuid: new_code.uuid,
                tenant,
                code: new_code.code,
                version: 0,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(discount_code_uuid = %record.uuid, "created discount code");

        Ok(record)
    }

    #[tracing::instrument(
        name = "discount_codes.service.get_code",
        skip(self),
        fields(tenant_uuid = %tenant, code = %code),
        err
    )]
    async fn get_code(
        &self,
        tenant: TenantUuid,
        code: CouponCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError> {
        self.find(tenant, &code).await
    }

    #[tracing::instrument(
        name = "discount_codes.service.list_codes",
        skip(self),
        fields(tenant_uuid = %tenant),
        err
    )]
    async fn list_codes(
        &self,
        tenant: TenantUuid,
    ) -> Result<Vec<DiscountCodeRecord>, DiscountCodesServiceError> {
        Ok(self.repository.list(tenant).await?)
    }

    #[tracing::instrument(
        name = "discount_codes.service.deactivate_code",
        skip(self),
        fields(tenant_uuid = %tenant, code = %code),
        err
    )]
    async fn deactivate_code(
        &self,
        tenant: TenantUuid,
        code: CouponCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError> {
        let mut record = self.find(tenant, &code).await?;

        if !record.code.is_active() {
            return Ok(record);
        }

        let expected_version = record.version;

        record.code.deactivate();
        record.updated_at = self.clock.now();

        let record = self.repository.save(record, expected_version).await?;

        info!(version = record.version, "deactivated discount code");

        Ok(record)
    }

    #[tracing::instrument(
        name = "discount_codes.service.quote",
        skip(self, request),
        fields(
            tenant_uuid = %tenant,
            code = %request.code,
            original_price = %request.original_price
        ),
        err
    )]
    async fn quote(
        &self,
        tenant: TenantUuid,
        request: RedemptionRequest,
    ) -> Result<DiscountApplicationResult, DiscountCodesServiceError> {
        let record = self.find(tenant, &request.code).await?;

        let result = self
            .policy
            .evaluate(
                &record.code,
                request.original_price,
                self.clock.now(),
                request.audience.as_ref(),
            )
            .inspect_err(|error| debug!(%error, "discount code not applicable"))?;

        debug!(discount_amount = %result.discount_amount(), "quoted discount code");

        Ok(result)
    }

    #[tracing::instrument(
        name = "discount_codes.service.redeem",
        skip(self, request),
        fields(
            tenant_uuid = %tenant,
            code = %request.code,
            original_price = %request.original_price
        ),
        err
    )]
    async fn redeem(
        &self,
        tenant: TenantUuid,
        request: RedemptionRequest,
    ) -> Result<DiscountApplicationResult, DiscountCodesServiceError> {
        let mut record = self.find(tenant, &request.code).await?;

        let expected_version = record.version;
        let now = self.clock.now();

        let result = record
            .code
            .redeem(
                &self.policy,
                request.original_price,
                now,
                request.audience.as_ref(),
            )
            .inspect_err(|error| debug!(%error, "discount code not redeemable"))?;

        record.updated_at = now;

        let record = self.repository.save(record, expected_version).await?;

        info!(
            discount_amount = %result.discount_amount(),
            final_price = %result.final_price(),
            times_used = record.code.usage().times_used,
            "redeemed discount code"
        );

        Ok(result)
    }
}

/// Discount code administration and redemption.
#[automock]
#[async_trait]
pub trait DiscountCodesService: Send + Sync {
    /// Creates a new code for a tenant.
    async fn create_code(
        &self,
        tenant: TenantUuid,
        new_code: NewDiscountCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError>;

    async fn get_code(
        &self,
        tenant: TenantUuid,
        code: CouponCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError>;

    async fn list_codes(
        &self,
        tenant: TenantUuid,
    ) -> Result<Vec<DiscountCodeRecord>, DiscountCodesServiceError>;

    /// Retires a code. Deactivating an inactive code is a no-op.
    async fn deactivate_code(
        &self,
        tenant: TenantUuid,
        code: CouponCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError>;

    /// Evaluates a code without recording a use.
    async fn quote(
        &self,
        tenant: TenantUuid,
        request: RedemptionRequest,
    ) -> Result<DiscountApplicationResult, DiscountCodesServiceError>;

    /// Evaluates a code and records the use. Losing a race with another redemption of the same
    /// code returns [`DiscountCodesServiceError::Conflict`]; nothing is retried.
    async fn redeem(
        &self,
        tenant: TenantUuid,
        request: RedemptionRequest,
    ) -> Result<DiscountApplicationResult, DiscountCodesServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use voucher::{
        audience::AudienceKey,
        codes::DiscountCode,
        discounts::DiscountValue,
        errors::{IneligibleRedemption, ValidationError},
        validity::ValidityWindow,
    };

    use crate::{
        clock::{MockClock, SystemClock},
        domain::discount_codes::repository::{
            InMemoryDiscountCodesRepository, MockDiscountCodesRepository, RepositoryError,
        },
        uuids::DiscountCodeUuid,
    };

    use super::*;

    fn now() -> Result<Timestamp, jiff::Error> {
        "2026-05-01T10:00:00Z".parse()
    }

    fn fixed_clock(at: Timestamp) -> Arc<MockClock> {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(at);

        Arc::new(clock)
    }

    fn in_memory_service(at: Timestamp) -> DiscountCodesManager {
        DiscountCodesManager::new(
            Arc::new(InMemoryDiscountCodesRepository::new()),
            fixed_clock(at),
            DiscountRedemptionPolicy::default(),
        )
    }

    fn ten_percent(code: &str) -> Result<DiscountCode, ValidationError> {
        Ok(DiscountCode::new(
            CouponCode::new(code)?,
            DiscountValue::percentage(Decimal::from(10))?,
        ))
    }

    fn request(code: &str, price: i64) -> Result<RedemptionRequest, ValidationError> {
        Ok(RedemptionRequest {
            code: CouponCode::new(code)?,
            original_price: Decimal::from(price),
            audience: None,
        })
    }

    #[tokio::test]
    async fn create_code_stamps_timestamps_and_version() -> TestResult {
        let at = now()?;
        let service = in_memory_service(at);
        let tenant = TenantUuid::new();
        let uuid = DiscountCodeUuid::new();

        let record = service
            .create_code(
                tenant,
                NewDiscountCode {
                    uuid,
                    code: ten_percent("SAVE10")?,
                },
            )
            .await?;

        assert_eq!(record.uuid, uuid);
        assert_eq!(record.tenant, tenant);
        assert_eq!(record.version, 0);
        assert_eq!(record.created_at, at);
        assert_eq!(record.updated_at, at);

        Ok(())
    }

    #[tokio::test]
    async fn create_duplicate_code_returns_already_exists() -> TestResult {
        let service = in_memory_service(now()?);
        let tenant = TenantUuid::new();

        service
            .create_code(tenant, ten_percent("SAVE10")?.into())
            .await?;

        let result = service
            .create_code(tenant, ten_percent("save10")?.into())
            .await;

        assert!(
            matches!(result, Err(DiscountCodesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_code_returns_not_found() -> TestResult {
        let service = in_memory_service(now()?);

        let result = service
            .get_code(TenantUuid::new(), CouponCode::new("NOPE")?)
            .await;

        assert_eq!(result, Err(DiscountCodesServiceError::NotFound));

        Ok(())
    }

    #[tokio::test]
    async fn quote_does_not_record_usage() -> TestResult {
        let service = in_memory_service(now()?);
        let tenant = TenantUuid::new();

        service
            .create_code(tenant, ten_percent("SAVE10")?.with_usage_limit(1).into())
            .await?;

        let first = service.quote(tenant, request("SAVE10", 1000)?).await?;
        let second = service.quote(tenant, request("SAVE10", 1000)?).await?;

        assert_eq!(first, second);
        assert_eq!(first.final_price(), Decimal::from(900));

        let record = service
            .get_code(tenant, CouponCode::new("SAVE10")?)
            .await?;

        assert_eq!(record.code.usage().times_used, 0);
        assert_eq!(record.version, 0);

        Ok(())
    }

    #[tokio::test]
    async fn redeem_records_usage_and_bumps_version() -> TestResult {
        let at = now()?;
        let service = in_memory_service(at);
        let tenant = TenantUuid::new();

        service
            .create_code(tenant, ten_percent("SAVE10")?.with_usage_limit(2).into())
            .await?;

        let result = service.redeem(tenant, request("SAVE10", 250)?).await?;

        assert_eq!(result.discount_amount(), Decimal::from(25));

        let record = service
            .get_code(tenant, CouponCode::new("SAVE10")?)
            .await?;

        assert_eq!(record.code.usage().times_used, 1);
        assert_eq!(record.code.usage().last_redeemed_at, Some(at));
        assert_eq!(record.code.remaining_uses(), Some(1));
        assert_eq!(record.version, 1);

        Ok(())
    }

    #[tokio::test]
    async fn redeem_exhausted_code_is_ineligible() -> TestResult {
        let service = in_memory_service(now()?);
        let tenant = TenantUuid::new();

        service
            .create_code(tenant, ten_percent("ONCE")?.with_usage_limit(1).into())
            .await?;

        service.redeem(tenant, request("ONCE", 100)?).await?;

        let result = service.redeem(tenant, request("ONCE", 100)?).await;

        assert_eq!(
            result,
            Err(DiscountCodesServiceError::Ineligible(
                IneligibleRedemption::UsageExhausted { limit: 1 }
            ))
        );

        Ok(())
    }

    #[tokio::test]
    async fn redeem_expired_code_is_ineligible() -> TestResult {
        let at = now()?;
        let service = in_memory_service(at);
        let tenant = TenantUuid::new();

        service
            .create_code(
                tenant,
                ten_percent("OLD")?
                    .with_validity(ValidityWindow::ending(at))
                    .into(),
            )
            .await?;

        let result = service.redeem(tenant, request("OLD", 100)?).await;

        assert_eq!(
            result,
            Err(DiscountCodesServiceError::Ineligible(
                IneligibleRedemption::Expired { ends_at: at }
            ))
        );

        Ok(())
    }

    #[tokio::test]
    async fn redeem_negative_price_is_invalid() -> TestResult {
        let service = in_memory_service(now()?);
        let tenant = TenantUuid::new();

        service
            .create_code(tenant, ten_percent("SAVE10")?.into())
            .await?;

        let result = service.redeem(tenant, request("SAVE10", -5)?).await;

        assert_eq!(
            result,
            Err(DiscountCodesServiceError::Invalid(
                ValidationError::NegativePrice(Decimal::from(-5))
            ))
        );

        Ok(())
    }

    #[tokio::test]
    async fn redeem_checks_audience() -> TestResult {
        let service = in_memory_service(now()?);
        let tenant = TenantUuid::new();

        service
            .create_code(
                tenant,
                ten_percent("MEMBERS")?
                    .with_audience(AudienceKey::new("members")?)
                    .into(),
            )
            .await?;

        let anonymous = service.redeem(tenant, request("MEMBERS", 100)?).await;

        assert_eq!(
            anonymous,
            Err(DiscountCodesServiceError::Ineligible(
                IneligibleRedemption::AudienceMismatch
            ))
        );

        let member = service
            .redeem(
                tenant,
                RedemptionRequest {
                    audience: Some(AudienceKey::new("Members")?),
                    ..request("MEMBERS", 100)?
                },
            )
            .await?;

        assert_eq!(member.audience_key().map(AudienceKey::as_str), Some("Members"));

        Ok(())
    }

    #[tokio::test]
    async fn deactivate_blocks_further_redemptions() -> TestResult {
        let service = in_memory_service(now()?);
        let tenant = TenantUuid::new();

        service
            .create_code(tenant, ten_percent("SAVE10")?.into())
            .await?;

        let record = service
            .deactivate_code(tenant, CouponCode::new("SAVE10")?)
            .await?;

        assert!(!record.code.is_active());
        assert_eq!(record.version, 1);

        let again = service
            .deactivate_code(tenant, CouponCode::new("SAVE10")?)
            .await?;

        assert_eq!(again.version, 1);

        let result = service.redeem(tenant, request("SAVE10", 100)?).await;

        assert_eq!(
            result,
            Err(DiscountCodesServiceError::Ineligible(
                IneligibleRedemption::Inactive
            ))
        );

        Ok(())
    }

    #[tokio::test]
    async fn redeem_saves_with_loaded_version() -> TestResult {
        let at = now()?;
        let tenant = TenantUuid::new();
        let stored = DiscountCodeRecord {
            uuid: DiscountCodeUuid::new(),
            tenant,
            code: ten_percent("SAVE10")?,
            version: 7,
            created_at: at,
            updated_at: at,
        };

        let mut repo = MockDiscountCodesRepository::new();

        repo.expect_find_by_code()
            .once()
            .withf(move |t, code| *t == tenant && code.as_str() == "SAVE10")
            .return_once(move |_, _| Ok(Some(stored)));

        repo.expect_save()
            .once()
            .withf(move |record, expected| {
                *expected == 7
                    && record.code.usage().times_used == 1
                    && record.updated_at == at
            })
            .return_once(|record, _| {
                Ok(DiscountCodeRecord {
                    version: 8,
                    ..record
                })
            });

        repo.expect_insert().never();
        repo.expect_list().never();

        let service = DiscountCodesManager::new(
            Arc::new(repo),
            fixed_clock(at),
            DiscountRedemptionPolicy::default(),
        );

        let result = service.redeem(tenant, request("SAVE10", 40)?).await?;

        assert_eq!(result.final_price(), Decimal::from(36));

        Ok(())
    }

    #[tokio::test]
    async fn redeem_version_conflict_returns_conflict() -> TestResult {
        let at = now()?;
        let tenant = TenantUuid::new();
        let stored = DiscountCodeRecord {
            uuid: DiscountCodeUuid::new(),
            tenant,
            code: ten_percent("SAVE10")?,
            version: 3,
            created_at: at,
            updated_at: at,
        };

        let mut repo = MockDiscountCodesRepository::new();

        repo.expect_find_by_code()
            .once()
            .return_once(move |_, _| Ok(Some(stored)));

        repo.expect_save().once().return_once(|_, expected| {
            Err(RepositoryError::VersionConflict {
                expected,
                actual: expected + 1,
            })
        });

        let service = DiscountCodesManager::new(
            Arc::new(repo),
            fixed_clock(at),
            DiscountRedemptionPolicy::default(),
        );

        let result = service.redeem(tenant, request("SAVE10", 40)?).await;

        assert_eq!(result, Err(DiscountCodesServiceError::Conflict));

        Ok(())
    }

    #[tokio::test]
    async fn ineligible_redemption_never_saves() -> TestResult {
        let at = now()?;
        let tenant = TenantUuid::new();
        let mut code = ten_percent("SAVE10")?;
        code.deactivate();

        let stored = DiscountCodeRecord {
            uuid: DiscountCodeUuid::new(),
            tenant,
            code,
            version: 0,
            created_at: at,
            updated_at: at,
        };

        let mut repo = MockDiscountCodesRepository::new();

        repo.expect_find_by_code()
            .once()
            .return_once(move |_, _| Ok(Some(stored)));

        repo.expect_save().never();

        let service = DiscountCodesManager::new(
            Arc::new(repo),
            fixed_clock(at),
            DiscountRedemptionPolicy::default(),
        );

        let result = service.redeem(tenant, request("SAVE10", 40)?).await;

        assert!(matches!(
            result,
            Err(DiscountCodesServiceError::Ineligible(
                IneligibleRedemption::Inactive
            ))
        ));

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_redemptions_of_single_use_code_succeed_once() -> TestResult {
        let service = Arc::new(DiscountCodesManager::new(
            Arc::new(InMemoryDiscountCodesRepository::new()),
            Arc::new(SystemClock),
            DiscountRedemptionPolicy::default(),
        ));
        let tenant = TenantUuid::new();

        service
            .create_code(tenant, ten_percent("SINGLE")?.with_usage_limit(1).into())
            .await?;

        let mut handles = Vec::new();

        for _ in 0..8 {
            let service = Arc::clone(&service);
            let request = request("SINGLE", 100)?;

            handles.push(tokio::spawn(async move {
                service.redeem(tenant, request).await
            }));
        }

        let mut successes = 0;

        for handle in handles {
            match handle.await? {
                Ok(_) => successes += 1,
                Err(
                    DiscountCodesServiceError::Conflict
                    | DiscountCodesServiceError::Ineligible(
                        IneligibleRedemption::UsageExhausted { .. },
                    ),
                ) => {}
                Err(other) => return Err(format!("unexpected error: {other}").into()),
            }
        }

        assert_eq!(successes, 1);

        let record = service
            .get_code(tenant, CouponCode::new("SINGLE")?)
            .await?;

        assert_eq!(record.code.usage().times_used, 1);

        Ok(())
    }
}
