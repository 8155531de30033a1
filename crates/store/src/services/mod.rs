//! Application services coordinating the domain with the repositories.

use thiserror::Error;

use cafekiosk_core::DomainError;

use crate::repository::RepositoryError;

pub mod numbering;
pub mod orders;
pub mod products;
pub mod statistics;

pub use numbering::ProductNumberFactory;
pub use orders::OrderService;
pub use products::ProductService;
pub use statistics::OrderStatisticsService;

/// Service-level error: either the domain refused, or storage failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
