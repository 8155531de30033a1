use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cafekiosk_catalog::{Product, ProductSellingStatus, ProductType};
use cafekiosk_orders::{Order, OrderStatus};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub product_type: ProductType,
    pub selling_status: ProductSellingStatus,
    pub name: String,
    pub price: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product_numbers: Vec<String>,
}

/// A missing or null `status` flows through to the domain check, which owns
/// the rejection message.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub product_number: String,
    pub product_type: ProductType,
    pub selling_status: ProductSellingStatus,
    pub name: String,
    pub price: u64,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            product_number: product.product_number().to_string(),
            product_type: product.product_type(),
            selling_status: product.selling_status(),
            name: product.name().to_string(),
            price: product.price(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub status: OrderStatus,
    pub total_price: u64,
    pub registered_at: DateTime<Utc>,
    pub products: Vec<ProductResponse>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            status: order.status(),
            total_price: order.total_price(),
            registered_at: order.registered_at(),
            products: order.products().iter().map(ProductResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DailyRevenueResponse {
    pub date: String,
    pub total_price: u64,
}
