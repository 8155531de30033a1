//! Service construction over the PostgreSQL repositories.

use std::sync::Arc;

use sqlx::PgPool;

use cafekiosk_store::repository::{PostgresOrderRepository, PostgresProductRepository};
use cafekiosk_store::services::{OrderService, OrderStatisticsService, ProductService};

/// Everything the routes need, wired once at startup.
pub struct AppServices {
    pub products: ProductService<Arc<PostgresProductRepository>>,
    pub orders: OrderService<Arc<PostgresProductRepository>, Arc<PostgresOrderRepository>>,
    pub statistics: OrderStatisticsService<Arc<PostgresOrderRepository>>,
}

pub fn build_services(pool: PgPool) -> AppServices {
    let product_repo = Arc::new(PostgresProductRepository::new(pool.clone()));
    let order_repo = Arc::new(PostgresOrderRepository::new(pool));

    AppServices {
        products: ProductService::new(product_repo.clone()),
        orders: OrderService::new(product_repo, order_repo.clone()),
        statistics: OrderStatisticsService::new(order_repo),
    }
}
