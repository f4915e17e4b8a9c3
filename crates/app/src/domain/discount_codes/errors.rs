//! Discount codes service errors.

use thiserror::Error;
use voucher::errors::{IneligibleRedemption, RedemptionError, ValidationError};

use crate::domain::discount_codes::repository::RepositoryError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountCodesServiceError {
    #[error("discount code already exists")]
    AlreadyExists,

    #[error("discount code not found")]
    NotFound,

    #[error("discount code was changed by another request; reload and try again")]
    Conflict,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Ineligible(#[from] IneligibleRedemption),
}

impl From<RepositoryError> for DiscountCodesServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::AlreadyExists => Self::AlreadyExists,
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::VersionConflict { .. } => Self::Conflict,
        }
    }
}

impl From<RedemptionError> for DiscountCodesServiceError {
    fn from(error: RedemptionError) -> Self {
        match error {
            RedemptionError::Validation(error) => Self::Invalid(error),
            RedemptionError::Ineligible(error) => Self::Ineligible(error),
        }
    }
}
