//! Discount Codes Repository

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use voucher::codes::CouponCode;

use crate::{domain::discount_codes::records::DiscountCodeRecord, uuids::TenantUuid};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("discount code already exists")]
    AlreadyExists,

    #[error("discount code not found")]
    NotFound,

    #[error("expected version {expected} but stored version is {actual}")]
    VersionConflict { expected: u64, actual: u64 },
}

/// Discount code persistence, scoped by tenant.
#[automock]
#[async_trait]
pub trait DiscountCodesRepository: Send + Sync {
    /// Stores a new record. Codes are unique per tenant.
    async fn insert(
        &self,
        record: DiscountCodeRecord,
    ) -> Result<DiscountCodeRecord, RepositoryError>;

    async fn find_by_code(
        &self,
        tenant: TenantUuid,
        code: &CouponCode,
    ) -> Result<Option<DiscountCodeRecord>, RepositoryError>;

    /// Lists a tenant's codes ordered by code.
    async fn list(&self, tenant: TenantUuid) -> Result<Vec<DiscountCodeRecord>, RepositoryError>;

    /// Replaces a stored record if its version still equals `expected_version`, returning the
    /// record with its version bumped.
    async fn save(
        &self,
        record: DiscountCodeRecord,
        expected_version: u64,
    ) -> Result<DiscountCodeRecord, RepositoryError>;
}

type TenantCodes = FxHashMap<CouponCode, DiscountCodeRecord>;

/// Process-local store. The version check and write happen under one lock, so concurrent
/// saves of the same version cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryDiscountCodesRepository {
    tenants: RwLock<FxHashMap<TenantUuid, TenantCodes>>,
}

impl InMemoryDiscountCodesRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiscountCodesRepository for InMemoryDiscountCodesRepository {
    async fn insert(
        &self,
        record: DiscountCodeRecord,
    ) -> Result<DiscountCodeRecord, RepositoryError> {
        let mut tenants = self.tenants.write().await;
        let codes = tenants.entry(record.tenant).or_default();

        if codes.contains_key(record.code.code()) {
            return Err(RepositoryError::AlreadyExists);
        }

        codes.insert(record.code.code().clone(), record.clone());

        Ok(record)
    }

    async fn find_by_code(
        &self,
        tenant: TenantUuid,
        code: &CouponCode,
    ) -> Result<Option<DiscountCodeRecord>, RepositoryError> {
        let tenants = self.tenants.read().await;

        Ok(tenants
            .get(&tenant)
            .and_then(|codes| codes.get(code))
            .cloned())
    }

    async fn list(&self, tenant: TenantUuid) -> Result<Vec<DiscountCodeRecord>, RepositoryError> {
        let tenants = self.tenants.read().await;

        let mut records: Vec<_> = tenants
            .get(&tenant)
            .map(|codes| codes.values().cloned().collect())
            .unwrap_or_default();

        records.sort_by(|a, b| a.code.code().cmp(b.code.code()));

        Ok(records)
    }

    async fn save(
        &self,
        mut record: DiscountCodeRecord,
        expected_version: u64,
    ) -> Result<DiscountCodeRecord, RepositoryError> {
        let mut tenants = self.tenants.write().await;

        let stored = tenants
            .get_mut(&record.tenant)
            .and_then(|codes| codes.get_mut(record.code.code()))
            .ok_or(RepositoryError::NotFound)?;

        if stored.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                actual: stored.version,
            });
        }

        record.version = expected_version + 1;
        *stored = record.clone();

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use voucher::{codes::DiscountCode, discounts::DiscountValue};

    use crate::uuids::DiscountCodeUuid;

    use super::*;

    fn record(
        tenant: TenantUuid,
        code: &str,
    ) -> Result<DiscountCodeRecord, Box<dyn std::error::Error>> {
        let now = Timestamp::from_second(1_750_000_000)?;

        Ok(DiscountCodeRecord {
            uuid: DiscountCodeUuid::new(),
            tenant,
            code: DiscountCode::new(
                CouponCode::new(code)?,
                DiscountValue::percentage(Decimal::from(10))?,
            ),
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    #[tokio::test]
    async fn insert_then_find_by_code() -> TestResult {
        let repo = InMemoryDiscountCodesRepository::new();
        let tenant = TenantUuid::new();
        let record = record(tenant, "SAVE10")?;

        repo.insert(record.clone()).await?;

        let found = repo
            .find_by_code(tenant, &CouponCode::new("save10")?)
            .await?;

        assert_eq!(found, Some(record));

        Ok(())
    }

    #[tokio::test]
    async fn insert_duplicate_code_returns_already_exists() -> TestResult {
        let repo = InMemoryDiscountCodesRepository::new();
        let tenant = TenantUuid::new();

        repo.insert(record(tenant, "SAVE10")?).await?;

        let result = repo.insert(record(tenant, "SAVE10")?).await;

        assert_eq!(result, Err(RepositoryError::AlreadyExists));

        Ok(())
    }

    #[tokio::test]
    async fn tenants_are_isolated() -> TestResult {
        let repo = InMemoryDiscountCodesRepository::new();
        let first = TenantUuid::new();
        let second = TenantUuid::new();

        repo.insert(record(first, "SAVE10")?).await?;
        repo.insert(record(second, "SAVE10")?).await?;

        let code = CouponCode::new("SAVE10")?;

        assert!(repo.find_by_code(first, &code).await?.is_some());
        assert!(repo.find_by_code(TenantUuid::new(), &code).await?.is_none());
        assert_eq!(repo.list(second).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_by_code() -> TestResult {
        let repo = InMemoryDiscountCodesRepository::new();
        let tenant = TenantUuid::new();

        for code in ["ZULU", "ALPHA", "MIKE"] {
            repo.insert(record(tenant, code)?).await?;
        }

        let codes: Vec<String> = repo
            .list(tenant)
            .await?
            .into_iter()
            .map(|record| record.code.code().to_string())
            .collect();

        assert_eq!(codes, ["ALPHA", "MIKE", "ZULU"]);

        Ok(())
    }

    #[tokio::test]
    async fn save_bumps_version() -> TestResult {
        let repo = InMemoryDiscountCodesRepository::new();
        let record = repo.insert(record(TenantUuid::new(), "SAVE10")?).await?;

        let saved = repo.save(record, 0).await?;
        let saved = repo.save(saved, 1).await?;

        assert_eq!(saved.version, 2);

        Ok(())
    }

    #[tokio::test]
    async fn save_with_stale_version_returns_conflict() -> TestResult {
        let repo = InMemoryDiscountCodesRepository::new();
        let record = repo.insert(record(TenantUuid::new(), "SAVE10")?).await?;

        repo.save(record.clone(), 0).await?;

        let result = repo.save(record, 0).await;

        assert_eq!(
            result,
            Err(RepositoryError::VersionConflict {
                expected: 0,
                actual: 1
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn save_unknown_code_returns_not_found() -> TestResult {
        let repo = InMemoryDiscountCodesRepository::new();

        let result = repo.save(record(TenantUuid::new(), "GHOST")?, 0).await;

        assert_eq!(result, Err(RepositoryError::NotFound));

        Ok(())
    }
}
