use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};

use cafekiosk_core::OrderId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().nest("/orders", orders_router())
}

fn orders_router() -> Router {
    Router::new()
        .route("/", post(create_order))
        .route("/:id/status", post(update_order_status))
        .route("/daily-revenue/:date", get(daily_revenue))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    // The registration timestamp is fixed here; the domain never reads a
    // clock.
    let order = match services
        .orders
        .create_order(&body.product_numbers, Utc::now())
        .await
    {
        Ok(order) => order,
        Err(e) => return errors::service_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::OrderResponse::from(&order))).into_response()
}

pub async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderStatusRequest>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };

    let order = match services
        .orders
        .update_order_status(order_id, body.status)
        .await
    {
        Ok(order) => order,
        Err(e) => return errors::service_error_to_response(e),
    };

    Json(dto::OrderResponse::from(&order)).into_response()
}

pub async fn daily_revenue(
    Extension(services): Extension<Arc<AppServices>>,
    Path(date): Path<String>,
) -> axum::response::Response {
    let day = match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
        Ok(day) => day,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_date",
                "date must be YYYY-MM-DD",
            )
        }
    };

    let total_price = match services.statistics.payment_completed_total_on(day).await {
        Ok(total) => total,
        Err(e) => return errors::service_error_to_response(e),
    };

    Json(dto::DailyRevenueResponse {
        date: day.to_string(),
        total_price,
    })
    .into_response()
}
