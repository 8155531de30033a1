use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().nest("/products", products_router())
}

fn products_router() -> Router {
    Router::new()
        .route("/", post(create_product))
        .route("/selling", get(list_selling_products))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let created = match services
        .products
        .create_product(body.product_type, body.selling_status, body.name, body.price)
        .await
    {
        Ok(p) => p,
        Err(e) => return errors::service_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(dto::ProductResponse::from(&created)),
    )
        .into_response()
}

pub async fn list_selling_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let products = match services.products.get_selling_products().await {
        Ok(products) => products,
        Err(e) => return errors::service_error_to_response(e),
    };

    let body: Vec<dto::ProductResponse> =
        products.iter().map(dto::ProductResponse::from).collect();
    Json(body).into_response()
}
