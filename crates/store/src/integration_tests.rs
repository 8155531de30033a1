//! Integration tests for services + repositories over the in-memory backend.
//!
//! Covers: product numbering against persisted state, the date-range/status
//! order query boundaries, order intake, the display listing, and daily
//! revenue.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use cafekiosk_catalog::{Product, ProductSellingStatus, ProductType};
use cafekiosk_orders::{Order, OrderStatus};
use cafekiosk_core::{DomainError, OrderId};

use crate::repository::{
    InMemoryOrderRepository, InMemoryProductRepository, OrderRepository, ProductRepository,
};
use crate::services::{
    OrderService, OrderStatisticsService, ProductNumberFactory, ProductService, ServiceError,
};

fn product(number: &str, price: u64) -> Product {
    Product::builder()
        .product_number(number)
        .product_type(ProductType::Handmade)
        .selling_status(ProductSellingStatus::Selling)
        .name("americano")
        .price(price)
        .build()
        .unwrap()
}

fn product_with_status(number: &str, status: ProductSellingStatus) -> Product {
    Product::builder()
        .product_number(number)
        .product_type(ProductType::Handmade)
        .selling_status(status)
        .name("americano")
        .price(4000)
        .build()
        .unwrap()
}

fn order_at(registered_at: DateTime<Utc>) -> Order {
    Order::create(vec![product("001", 3000)], registered_at)
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

mod product_number_factory {
    use super::*;

    #[tokio::test]
    async fn returns_001_for_an_empty_catalog() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let factory = ProductNumberFactory::new(repo);

        let number = factory.create_next_product_number().await.unwrap();

        assert_eq!(number, "001");
    }

    #[tokio::test]
    async fn returns_latest_number_plus_one() {
        let repo = Arc::new(InMemoryProductRepository::new());
        repo.save_all(&[product("001", 3500), product("002", 3500)])
            .await
            .unwrap();
        let factory = ProductNumberFactory::new(repo.clone());

        let latest = repo.find_latest_product_number().await.unwrap().unwrap();
        let number = factory.create_next_product_number().await.unwrap();

        assert_eq!(
            number.parse::<u64>().unwrap(),
            latest.parse::<u64>().unwrap() + 1
        );
        assert_eq!(number, "003");
    }
}

mod order_repository {
    use super::*;

    #[tokio::test]
    async fn finds_orders_in_range_with_requested_status() {
        let repo = InMemoryOrderRepository::new();

        let order1 = order_at(at(2025, 10, 5, 15, 55));
        let mut order2 = order_at(at(2025, 10, 7, 15, 55));
        order2
            .update_status(Some(OrderStatus::PaymentCompleted))
            .unwrap();
        repo.save_all(&[order1, order2]).await.unwrap();

        let result = repo
            .find_orders_by(
                at(2025, 10, 4, 15, 55),
                at(2025, 10, 8, 15, 55),
                OrderStatus::PaymentCompleted,
            )
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].status(), OrderStatus::PaymentCompleted);
    }

    #[tokio::test]
    async fn excludes_orders_registered_before_the_start() {
        let repo = InMemoryOrderRepository::new();
        let target = at(2025, 10, 7, 15, 55);

        let order1 = order_at(target - Duration::seconds(1));
        let mut order2 = order_at(target);
        order2
            .update_status(Some(OrderStatus::PaymentCompleted))
            .unwrap();
        let expected = order2.id();
        repo.save_all(&[order1, order2]).await.unwrap();

        let result = repo
            .find_orders_by(target, at(2025, 10, 9, 15, 55), OrderStatus::PaymentCompleted)
            .await
            .unwrap();

        // Registered exactly at the start boundary: found. One second
        // earlier: not found.
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id(), expected);
    }

    #[tokio::test]
    async fn excludes_orders_registered_at_or_after_the_end() {
        let repo = InMemoryOrderRepository::new();
        let target = at(2025, 10, 7, 15, 55);

        let order1 = order_at(at(2025, 10, 5, 15, 55));
        let mut order2 = order_at(target);
        order2
            .update_status(Some(OrderStatus::PaymentCompleted))
            .unwrap();
        repo.save_all(&[order1, order2]).await.unwrap();

        let result = repo
            .find_orders_by(at(2025, 10, 3, 15, 55), target, OrderStatus::PaymentCompleted)
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn save_replaces_an_existing_order() {
        let repo = InMemoryOrderRepository::new();
        let mut order = order_at(at(2025, 10, 5, 15, 55));
        repo.save(&order).await.unwrap();

        order
            .update_status(Some(OrderStatus::PaymentCompleted))
            .unwrap();
        repo.save(&order).await.unwrap();

        let loaded = repo.find_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::PaymentCompleted);
    }
}

mod product_service {
    use super::*;

    #[tokio::test]
    async fn create_product_assigns_sequential_numbers() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let service = ProductService::new(repo);

        let first = service
            .create_product(
                ProductType::Handmade,
                ProductSellingStatus::Selling,
                "americano".to_string(),
                4000,
            )
            .await
            .unwrap();
        let second = service
            .create_product(
                ProductType::Bakery,
                ProductSellingStatus::Hold,
                "croissant".to_string(),
                3500,
            )
            .await
            .unwrap();

        assert_eq!(first.product_number(), "001");
        assert_eq!(second.product_number(), "002");
    }

    #[tokio::test]
    async fn selling_products_exclude_stopped_entries() {
        let repo = Arc::new(InMemoryProductRepository::new());
        repo.save_all(&[
            product_with_status("001", ProductSellingStatus::Selling),
            product_with_status("002", ProductSellingStatus::Hold),
            product_with_status("003", ProductSellingStatus::StopSelling),
        ])
        .await
        .unwrap();
        let service = ProductService::new(repo);

        let listed = service.get_selling_products().await.unwrap();

        let numbers: Vec<&str> = listed.iter().map(|p| p.product_number()).collect();
        assert_eq!(numbers, vec!["001", "002"]);
    }

    #[tokio::test]
    async fn delete_all_empties_the_catalog() {
        let repo = Arc::new(InMemoryProductRepository::new());
        repo.save_all(&[product("001", 4000), product("002", 3500)])
            .await
            .unwrap();

        repo.delete_all().await.unwrap();

        assert!(repo.find_latest_product_number().await.unwrap().is_none());
    }
}

mod order_service {
    use super::*;

    fn service() -> (
        Arc<InMemoryProductRepository>,
        Arc<InMemoryOrderRepository>,
        OrderService<Arc<InMemoryProductRepository>, Arc<InMemoryOrderRepository>>,
    ) {
        let products = Arc::new(InMemoryProductRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::new());
        let service = OrderService::new(products.clone(), orders.clone());
        (products, orders, service)
    }

    #[tokio::test]
    async fn creates_an_order_from_product_numbers() {
        let (products, orders, service) = service();
        products
            .save_all(&[product("001", 1000), product("002", 3000)])
            .await
            .unwrap();
        let registered_at = at(2025, 10, 5, 15, 55);

        let order = service
            .create_order(&["001".to_string(), "002".to_string()], registered_at)
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Init);
        assert_eq!(order.total_price(), 4000);
        assert_eq!(order.registered_at(), registered_at);
        assert!(orders.find_by_id(order.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_numbers_count_once_per_occurrence() {
        let (products, _orders, service) = service();
        products.save(&product("001", 1000)).await.unwrap();

        let order = service
            .create_order(&["001".to_string(), "001".to_string()], Utc::now())
            .await
            .unwrap();

        assert_eq!(order.products().len(), 2);
        assert_eq!(order.total_price(), 2000);
    }

    #[tokio::test]
    async fn unknown_numbers_fail_the_order() {
        let (products, _orders, service) = service();
        products.save(&product("001", 1000)).await.unwrap();

        let err = service
            .create_order(&["001".to_string(), "999".to_string()], Utc::now())
            .await
            .unwrap_err();

        match err {
            ServiceError::Domain(DomainError::Validation(msg)) => {
                assert!(msg.contains("999"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_order_status_persists_the_transition() {
        let (products, orders, service) = service();
        products.save(&product("001", 1000)).await.unwrap();
        let order = service
            .create_order(&["001".to_string()], Utc::now())
            .await
            .unwrap();

        let updated = service
            .update_order_status(order.id(), Some(OrderStatus::PaymentCompleted))
            .await
            .unwrap();

        assert_eq!(updated.status(), OrderStatus::PaymentCompleted);
        let loaded = orders.find_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::PaymentCompleted);
    }

    #[tokio::test]
    async fn update_order_status_rejects_a_missing_value() {
        let (products, orders, service) = service();
        products.save(&product("001", 1000)).await.unwrap();
        let order = service
            .create_order(&["001".to_string()], Utc::now())
            .await
            .unwrap();

        let err = service.update_order_status(order.id(), None).await.unwrap_err();

        match err {
            ServiceError::Domain(DomainError::Validation(msg)) => {
                assert_eq!(msg, "order status must not be empty");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        let loaded = orders.find_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::Init);
    }

    #[tokio::test]
    async fn update_order_status_requires_an_existing_order() {
        let (_products, _orders, service) = service();

        let err = service
            .update_order_status(OrderId::new(), Some(OrderStatus::Canceled))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound)));
    }
}

mod order_statistics {
    use super::*;

    #[tokio::test]
    async fn sums_payment_completed_orders_of_the_day() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let day = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap();

        let mut same_day = Order::create(vec![product("001", 3000)], at(2025, 10, 7, 9, 30));
        same_day
            .update_status(Some(OrderStatus::PaymentCompleted))
            .unwrap();
        let mut same_day_late =
            Order::create(vec![product("002", 5000)], at(2025, 10, 7, 23, 59));
        same_day_late
            .update_status(Some(OrderStatus::PaymentCompleted))
            .unwrap();
        // Next midnight falls outside the half-open day window.
        let mut next_day = Order::create(vec![product("003", 7000)], at(2025, 10, 8, 0, 0));
        next_day
            .update_status(Some(OrderStatus::PaymentCompleted))
            .unwrap();
        // Same day, but never paid.
        let unpaid = Order::create(vec![product("004", 9000)], at(2025, 10, 7, 12, 0));

        repo.save_all(&[same_day, same_day_late, next_day, unpaid])
            .await
            .unwrap();
        let service = OrderStatisticsService::new(repo);

        let total = service.payment_completed_total_on(day).await.unwrap();

        assert_eq!(total, 8000);
    }
}
