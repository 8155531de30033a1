use std::collections::HashMap;

use chrono::{DateTime, Utc};

use cafekiosk_catalog::Product;
use cafekiosk_core::{DomainError, OrderId};
use cafekiosk_orders::{Order, OrderStatus};

use crate::repository::{OrderRepository, ProductRepository};
use crate::services::ServiceError;

/// Order intake: resolves requested product numbers against the catalog and
/// persists the resulting order.
#[derive(Debug, Clone)]
pub struct OrderService<P, O> {
    products: P,
    orders: O,
}

impl<P, O> OrderService<P, O>
where
    P: ProductRepository,
    O: OrderRepository,
{
    pub fn new(products: P, orders: O) -> Self {
        Self { products, orders }
    }

    /// Create an order from product numbers.
    ///
    /// Duplicate numbers are allowed and count once per occurrence. Unknown
    /// numbers fail the whole order.
    pub async fn create_order(
        &self,
        product_numbers: &[String],
        registered_at: DateTime<Utc>,
    ) -> Result<Order, ServiceError> {
        let products = self.resolve_products(product_numbers).await?;

        let order = Order::create(products, registered_at);
        self.orders.save(&order).await?;
        Ok(order)
    }

    /// Apply a status transition to a persisted order.
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: Option<OrderStatus>,
    ) -> Result<Order, ServiceError> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(DomainError::not_found)?;

        order.update_status(status)?;
        self.orders.save(&order).await?;
        Ok(order)
    }

    async fn resolve_products(
        &self,
        product_numbers: &[String],
    ) -> Result<Vec<Product>, ServiceError> {
        let found = self
            .products
            .find_all_by_product_number_in(product_numbers)
            .await?;

        let by_number: HashMap<&str, &Product> = found
            .iter()
            .map(|p| (p.product_number(), p))
            .collect();

        let missing: Vec<&str> = product_numbers
            .iter()
            .filter(|n| !by_number.contains_key(n.as_str()))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "unknown product numbers: {}",
                missing.join(", ")
            ))
            .into());
        }

        // Duplicates in the request map to the same catalog entry, one line
        // per occurrence.
        Ok(product_numbers
            .iter()
            .filter_map(|n| by_number.get(n.as_str()).map(|&p| p.clone()))
            .collect())
    }
}
