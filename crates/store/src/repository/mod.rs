//! Repository abstractions over the relational store.
//!
//! Two implementations exist: [`postgres`] for production and [`in_memory`]
//! for tests/dev. Both preserve insertion order, which is what
//! `find_latest_product_number` is defined against.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

use cafekiosk_catalog::{Product, ProductSellingStatus};
use cafekiosk_core::OrderId;
use cafekiosk_orders::{Order, OrderStatus};

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryOrderRepository, InMemoryProductRepository};
pub use postgres::{PostgresOrderRepository, PostgresProductRepository};

/// Repository operation error.
///
/// Infrastructure failures only; domain failures are modeled in
/// `cafekiosk_core::DomainError`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backend refused or failed the operation.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A persisted row could not be mapped back to a domain value.
    #[error("corrupt row: {0}")]
    Decode(String),
}

/// Catalog persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn save(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn save_all(&self, products: &[Product]) -> Result<(), RepositoryError>;

    /// Product number of the most recently persisted product, if any.
    ///
    /// "Latest" follows insertion order, not the numeric maximum.
    async fn find_latest_product_number(&self) -> Result<Option<String>, RepositoryError>;

    /// All products whose number appears in `numbers`, in insertion order.
    async fn find_all_by_product_number_in(
        &self,
        numbers: &[String],
    ) -> Result<Vec<Product>, RepositoryError>;

    /// All products whose selling status appears in `statuses`, in insertion
    /// order.
    async fn find_all_by_selling_status_in(
        &self,
        statuses: &[ProductSellingStatus],
    ) -> Result<Vec<Product>, RepositoryError>;

    async fn delete_all(&self) -> Result<(), RepositoryError>;
}

/// Order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order. Saving an already-persisted order replaces its row,
    /// so status updates go through the same call.
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    async fn save_all(&self, orders: &[Order]) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Orders registered within the half-open interval `[start, end)` whose
    /// status equals `status` exactly.
    async fn find_orders_by(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: OrderStatus,
    ) -> Result<Vec<Order>, RepositoryError>;

    async fn delete_all(&self) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        (**self).save(product).await
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), RepositoryError> {
        (**self).save_all(products).await
    }

    async fn find_latest_product_number(&self) -> Result<Option<String>, RepositoryError> {
        (**self).find_latest_product_number().await
    }

    async fn find_all_by_product_number_in(
        &self,
        numbers: &[String],
    ) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_all_by_product_number_in(numbers).await
    }

    async fn find_all_by_selling_status_in(
        &self,
        statuses: &[ProductSellingStatus],
    ) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_all_by_selling_status_in(statuses).await
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        (**self).delete_all().await
    }
}

#[async_trait]
impl<R> OrderRepository for Arc<R>
where
    R: OrderRepository + ?Sized,
{
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        (**self).save(order).await
    }

    async fn save_all(&self, orders: &[Order]) -> Result<(), RepositoryError> {
        (**self).save_all(orders).await
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_orders_by(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: OrderStatus,
    ) -> Result<Vec<Order>, RepositoryError> {
        (**self).find_orders_by(start, end, status).await
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        (**self).delete_all().await
    }
}
