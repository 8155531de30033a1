use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use cafekiosk_catalog::{Product, ProductSellingStatus};
use cafekiosk_core::OrderId;
use cafekiosk_orders::{Order, OrderStatus};

use super::{OrderRepository, ProductRepository, RepositoryError};

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("lock poisoned".to_string())
}

/// In-memory catalog repository.
///
/// Intended for tests/dev. Rows are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.push(product.clone());
        Ok(())
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.extend_from_slice(products);
        Ok(())
    }

    async fn find_latest_product_number(&self) -> Result<Option<String>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.last().map(|p| p.product_number().to_string()))
    }

    async fn find_all_by_product_number_in(
        &self,
        numbers: &[String],
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows
            .iter()
            .filter(|p| numbers.iter().any(|n| n == p.product_number()))
            .cloned()
            .collect())
    }

    async fn find_all_by_selling_status_in(
        &self,
        statuses: &[ProductSellingStatus],
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows
            .iter()
            .filter(|p| statuses.contains(&p.selling_status()))
            .cloned()
            .collect())
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.clear();
        Ok(())
    }
}

/// In-memory order repository.
///
/// Intended for tests/dev. `save` replaces an existing row with the same id.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    rows: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn upsert(rows: &mut Vec<Order>, order: &Order) {
        match rows.iter_mut().find(|o| o.id() == order.id()) {
            Some(existing) => *existing = order.clone(),
            None => rows.push(order.clone()),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        Self::upsert(&mut rows, order);
        Ok(())
    }

    async fn save_all(&self, orders: &[Order]) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        for order in orders {
            Self::upsert(&mut rows, order);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|o| o.id() == id).cloned())
    }

    async fn find_orders_by(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: OrderStatus,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows
            .iter()
            .filter(|o| {
                o.registered_at() >= start && o.registered_at() < end && o.status() == status
            })
            .cloned()
            .collect())
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.clear();
        Ok(())
    }
}
