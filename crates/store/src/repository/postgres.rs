//! PostgreSQL-backed repositories.
//!
//! Every operation runs against a shared `PgPool`; multi-statement writes use
//! a transaction. SQLx errors funnel through a single `map_sqlx_error`
//! translation point, and rows that cannot be mapped back into domain values
//! surface as `RepositoryError::Decode`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use cafekiosk_catalog::{Product, ProductSellingStatus, ProductType};
use cafekiosk_core::{OrderId, ProductId};
use cafekiosk_orders::{Order, OrderStatus};

use super::{OrderRepository, ProductRepository, RepositoryError};

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::Storage(format!("migrate: {e}")))
}

fn map_sqlx_error(operation: &str, e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(format!("{operation}: {e}"))
}

fn decode_error(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Decode(e.to_string())
}

fn product_from_row(row: &PgRow) -> Result<Product, RepositoryError> {
    let id: Uuid = row.try_get("id").map_err(decode_error)?;
    let product_number: String = row.try_get("product_number").map_err(decode_error)?;
    let product_type: ProductType = row
        .try_get::<String, _>("product_type")
        .map_err(decode_error)?
        .parse()
        .map_err(decode_error)?;
    let selling_status: ProductSellingStatus = row
        .try_get::<String, _>("selling_status")
        .map_err(decode_error)?
        .parse()
        .map_err(decode_error)?;
    let name: String = row.try_get("name").map_err(decode_error)?;
    let price: i64 = row.try_get("price").map_err(decode_error)?;
    let price = u64::try_from(price).map_err(|_| decode_error("negative price"))?;

    Product::builder()
        .id(ProductId::from_uuid(id))
        .product_number(product_number)
        .product_type(product_type)
        .selling_status(selling_status)
        .name(name)
        .price(price)
        .build()
        .map_err(decode_error)
}

/// Postgres-backed catalog repository.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: Arc<PgPool>,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    #[instrument(skip(self, product), fields(product_number = product.product_number()), err)]
    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, product_number, product_type, selling_status, name, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.product_number())
        .bind(product.product_type().as_str())
        .bind(product.selling_status().as_str())
        .bind(product.name())
        .bind(product.price() as i64)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_product", e))?;

        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn latest_product_number(&self) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT product_number
            FROM products
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_latest_product_number", e))?;

        row.map(|r| r.try_get("product_number").map_err(decode_error))
            .transpose()
    }

    #[instrument(skip(self), fields(count = numbers.len()), err)]
    async fn by_product_numbers(&self, numbers: &[String]) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_number, product_type, selling_status, name, price
            FROM products
            WHERE product_number = ANY($1)
            ORDER BY seq ASC
            "#,
        )
        .bind(numbers)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all_by_product_number_in", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self, statuses), err)]
    async fn by_selling_statuses(
        &self,
        statuses: &[ProductSellingStatus],
    ) -> Result<Vec<Product>, RepositoryError> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, product_number, product_type, selling_status, name, price
            FROM products
            WHERE selling_status = ANY($1)
            ORDER BY seq ASC
            "#,
        )
        .bind(&statuses)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all_by_selling_status_in", e))?;

        rows.iter().map(product_from_row).collect()
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        self.insert(product).await
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin", e))?;

        for product in products {
            sqlx::query(
                r#"
                INSERT INTO products (id, product_number, product_type, selling_status, name, price)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(product.id().as_uuid())
            .bind(product.product_number())
            .bind(product.product_type().as_str())
            .bind(product.selling_status().as_str())
            .bind(product.name())
            .bind(product.price() as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("save_all_products", e))?;
        }

        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))
    }

    async fn find_latest_product_number(&self) -> Result<Option<String>, RepositoryError> {
        self.latest_product_number().await
    }

    async fn find_all_by_product_number_in(
        &self,
        numbers: &[String],
    ) -> Result<Vec<Product>, RepositoryError> {
        self.by_product_numbers(numbers).await
    }

    async fn find_all_by_selling_status_in(
        &self,
        statuses: &[ProductSellingStatus],
    ) -> Result<Vec<Product>, RepositoryError> {
        self.by_selling_statuses(statuses).await
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_all_products", e))?;
        Ok(())
    }
}

/// Postgres-backed order repository.
///
/// Orders span two tables: `orders` and the position-preserving
/// `order_products` join table.
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: Arc<PgPool>,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn upsert_order(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order: &Order,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, order_status, total_price, registered_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                order_status = EXCLUDED.order_status,
                total_price = EXCLUDED.total_price,
                registered_at = EXCLUDED.registered_at
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(order.status().as_str())
        .bind(order.total_price() as i64)
        .bind(order.registered_at())
        .execute(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("save_order", e))?;

        sqlx::query("DELETE FROM order_products WHERE order_id = $1")
            .bind(order.id().as_uuid())
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error("save_order_lines", e))?;

        for (line_no, product) in order.products().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_products (order_id, line_no, product_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(order.id().as_uuid())
            .bind(line_no as i32)
            .bind(product.id().as_uuid())
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error("save_order_lines", e))?;
        }

        Ok(())
    }

    async fn load_order_products(&self, order_id: Uuid) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.product_number, p.product_type, p.selling_status, p.name, p.price
            FROM order_products op
            JOIN products p ON p.id = op.product_id
            WHERE op.order_id = $1
            ORDER BY op.line_no ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("load_order_products", e))?;

        rows.iter().map(product_from_row).collect()
    }

    async fn order_from_row(&self, row: &PgRow) -> Result<Order, RepositoryError> {
        let id: Uuid = row.try_get("id").map_err(decode_error)?;
        let status: OrderStatus = row
            .try_get::<String, _>("order_status")
            .map_err(decode_error)?
            .parse()
            .map_err(decode_error)?;
        let total_price: i64 = row.try_get("total_price").map_err(decode_error)?;
        let total_price = u64::try_from(total_price).map_err(|_| decode_error("negative total"))?;
        let registered_at: DateTime<Utc> = row.try_get("registered_at").map_err(decode_error)?;

        let products = self.load_order_products(id).await?;

        Ok(Order::reconstitute(
            OrderId::from_uuid(id),
            status,
            total_price,
            registered_at,
            products,
        ))
    }

    #[instrument(skip(self), fields(start = %start, end = %end, status = status.as_str()), err)]
    async fn orders_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: OrderStatus,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_status, total_price, registered_at
            FROM orders
            WHERE registered_at >= $1 AND registered_at < $2 AND order_status = $3
            ORDER BY registered_at ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(status.as_str())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_orders_by", e))?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            orders.push(self.order_from_row(row).await?);
        }
        Ok(orders)
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin", e))?;
        Self::upsert_order(&mut tx, order).await?;
        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))
    }

    async fn save_all(&self, orders: &[Order]) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin", e))?;
        for order in orders {
            Self::upsert_order(&mut tx, order).await?;
        }
        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, order_status, total_price, registered_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_order_by_id", e))?;

        match row {
            Some(row) => Ok(Some(self.order_from_row(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_orders_by(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: OrderStatus,
    ) -> Result<Vec<Order>, RepositoryError> {
        self.orders_between(start, end, status).await
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM orders")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_all_orders", e))?;
        Ok(())
    }
}
