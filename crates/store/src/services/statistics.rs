use chrono::{Duration, NaiveDate, NaiveTime};

use cafekiosk_orders::OrderStatus;

use crate::repository::OrderRepository;
use crate::services::ServiceError;

/// Daily order statistics over the date-range/status query.
#[derive(Debug, Clone)]
pub struct OrderStatisticsService<O> {
    orders: O,
}

impl<O> OrderStatisticsService<O>
where
    O: OrderRepository,
{
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    /// Total revenue of payment-completed orders registered on `day`
    /// (UTC, half-open day window).
    pub async fn payment_completed_total_on(&self, day: NaiveDate) -> Result<u64, ServiceError> {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);

        let orders = self
            .orders
            .find_orders_by(start, end, OrderStatus::PaymentCompleted)
            .await?;

        Ok(orders.iter().map(|o| o.total_price()).sum())
    }
}
