//! Discount code application layer: tenant-scoped storage, services and configuration.

pub mod clock;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod uuids;
