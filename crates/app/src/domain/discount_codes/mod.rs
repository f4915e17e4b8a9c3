//! Discount Codes

pub mod data;
pub mod dto;
mod errors;
pub mod records;
pub mod repository;
pub mod service;

pub use errors::DiscountCodesServiceError;
pub use repository::{
    DiscountCodesRepository, InMemoryDiscountCodesRepository, MockDiscountCodesRepository,
    RepositoryError,
};
pub use service::*;
