use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cafekiosk_catalog::Product;
use cafekiosk_core::{DomainError, DomainResult, OrderId};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Init,
    Canceled,
    PaymentCompleted,
    PaymentFailed,
    Received,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Init => "init",
            OrderStatus::Canceled => "canceled",
            OrderStatus::PaymentCompleted => "payment_completed",
            OrderStatus::PaymentFailed => "payment_failed",
            OrderStatus::Received => "received",
            OrderStatus::Completed => "completed",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(OrderStatus::Init),
            "canceled" => Ok(OrderStatus::Canceled),
            "payment_completed" => Ok(OrderStatus::PaymentCompleted),
            "payment_failed" => Ok(OrderStatus::PaymentFailed),
            "received" => Ok(OrderStatus::Received),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(DomainError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// An order over catalog products.
///
/// The total price is the sum of the products' prices at construction time
/// and is not recomputed afterwards. The registration timestamp is supplied
/// by the caller; no clock is read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    status: OrderStatus,
    total_price: u64,
    registered_at: DateTime<Utc>,
    products: Vec<Product>,
}

impl Order {
    /// Create a new order in [`OrderStatus::Init`].
    pub fn create(products: Vec<Product>, registered_at: DateTime<Utc>) -> Self {
        let total_price = products.iter().map(Product::price).sum();

        Self {
            id: OrderId::new(),
            status: OrderStatus::Init,
            total_price,
            registered_at,
            products,
        }
    }

    /// Rebuild a persisted order. Storage adapters only.
    ///
    /// The stored total is restored verbatim; it is never recomputed from the
    /// product list.
    pub fn reconstitute(
        id: OrderId,
        status: OrderStatus,
        total_price: u64,
        registered_at: DateTime<Utc>,
        products: Vec<Product>,
    ) -> Self {
        Self {
            id,
            status,
            total_price,
            registered_at,
            products,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn total_price(&self) -> u64 {
        self.total_price
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Replace the order status.
    ///
    /// An absent value is rejected; any present status is accepted without a
    /// transition table.
    pub fn update_status(&mut self, status: Option<OrderStatus>) -> DomainResult<()> {
        let status =
            status.ok_or_else(|| DomainError::validation("order status must not be empty"))?;
        self.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafekiosk_catalog::{ProductSellingStatus, ProductType};

    fn product(number: &str, price: u64) -> Product {
        Product::builder()
            .product_number(number)
            .product_type(ProductType::Handmade)
            .selling_status(ProductSellingStatus::Selling)
            .name("menu item")
            .price(price)
            .build()
            .unwrap()
    }

    #[test]
    fn create_computes_total_price_from_products() {
        let products = vec![product("001", 1000), product("002", 2000)];

        let order = Order::create(products, Utc::now());

        assert_eq!(order.total_price(), 3000);
    }

    #[test]
    fn create_starts_in_init_status() {
        let products = vec![product("001", 1000), product("002", 2000)];

        let order = Order::create(products, Utc::now());

        assert_eq!(order.status(), OrderStatus::Init);
    }

    #[test]
    fn create_keeps_registered_timestamp_verbatim() {
        let registered_at = Utc::now();
        let products = vec![product("001", 1000), product("002", 2000)];

        let order = Order::create(products, registered_at);

        assert_eq!(order.registered_at(), registered_at);
    }

    #[test]
    fn update_status_replaces_status() {
        let mut order = Order::create(vec![product("001", 3000)], Utc::now());

        order
            .update_status(Some(OrderStatus::PaymentCompleted))
            .unwrap();

        assert_eq!(order.status(), OrderStatus::PaymentCompleted);
    }

    #[test]
    fn update_status_rejects_missing_value() {
        let mut order = Order::create(vec![product("001", 3000)], Utc::now());

        let err = order.update_status(None).unwrap_err();

        assert_eq!(err.to_string(), "order status must not be empty");
        assert_eq!(order.status(), OrderStatus::Init);
    }

    #[test]
    fn reconstitute_keeps_stored_total() {
        let products = vec![product("001", 1000)];
        let registered_at = Utc::now();

        // A stored total may diverge from current product prices; it must
        // survive rehydration untouched.
        let order = Order::reconstitute(
            OrderId::new(),
            OrderStatus::PaymentCompleted,
            2500,
            registered_at,
            products,
        );

        assert_eq!(order.total_price(), 2500);
        assert_eq!(order.registered_at(), registered_at);
    }
}
