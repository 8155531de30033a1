use cafekiosk_catalog::{Product, ProductSellingStatus, ProductType};

use crate::repository::ProductRepository;
use crate::services::{ProductNumberFactory, ServiceError};

/// Catalog management: product registration and the display listing.
#[derive(Debug, Clone)]
pub struct ProductService<R> {
    products: R,
    numbering: ProductNumberFactory<R>,
}

impl<R> ProductService<R>
where
    R: ProductRepository + Clone,
{
    pub fn new(products: R) -> Self {
        let numbering = ProductNumberFactory::new(products.clone());
        Self {
            products,
            numbering,
        }
    }

    /// Register a product under the next sequential product number.
    pub async fn create_product(
        &self,
        product_type: ProductType,
        selling_status: ProductSellingStatus,
        name: String,
        price: u64,
    ) -> Result<Product, ServiceError> {
        let product_number = self.numbering.create_next_product_number().await?;

        let product = Product::builder()
            .product_number(product_number)
            .product_type(product_type)
            .selling_status(selling_status)
            .name(name)
            .price(price)
            .build()?;

        self.products.save(&product).await?;
        Ok(product)
    }

    /// Products shown on the kiosk menu (selling or on hold).
    pub async fn get_selling_products(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self
            .products
            .find_all_by_selling_status_in(&ProductSellingStatus::for_display())
            .await?;
        Ok(products)
    }
}
